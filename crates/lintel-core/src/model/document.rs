use crate::error::{Error, RefKind, Result};
use crate::ids::{LinkId, WordId};
use crate::model::cluster::Cluster;
use crate::model::input::{DocumentInput, EndpointRef, LinkInput, LinkStyleInput, StrokeInput};
use crate::model::link::{Anchor, Link};
use crate::model::row::Row;
use crate::model::style::{Color, LinkStyle, Stroke};
use crate::model::word::Word;
use rustc_hash::FxHashMap;

/// Arena owning every word, link, row and cluster of one annotation diagram.
///
/// Cross references are typed indices; nothing here holds a pointer to anything else.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub words: Vec<Word>,
    pub links: Vec<Link>,
    pub rows: Vec<Row>,
    pub clusters: Vec<Cluster>,
    pub canvas_width: f64,
    word_keys: FxHashMap<String, WordId>,
    link_keys: FxHashMap<String, LinkId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Copy)]
struct Roots {
    min: WordId,
    max: WordId,
    depth: usize,
}

impl Document {
    /// Resolves string references into handles. Fails on the first dangling reference.
    pub fn from_input(input: DocumentInput, canvas_width: f64) -> Result<Self> {
        let mut doc = Self {
            canvas_width,
            ..Self::default()
        };

        for (order, w) in input.words.into_iter().enumerate() {
            if doc.word_keys.contains_key(&w.id) {
                return Err(Error::DuplicateWord { id: w.id });
            }
            doc.word_keys.insert(w.id.clone(), WordId(order));
            doc.words.push(Word::new(w.id, w.text, order));
        }

        for (idx, l) in input.links.iter().enumerate() {
            if doc.link_keys.contains_key(&l.id) {
                return Err(Error::DuplicateLink { id: l.id.clone() });
            }
            doc.link_keys.insert(l.id.clone(), LinkId(idx));
        }

        let mut endpoints = Vec::with_capacity(input.links.len());
        for l in &input.links {
            let left = doc.resolve_link_endpoint(&l.id, &l.left)?;
            let right = doc.resolve_link_endpoint(&l.id, &l.right)?;
            endpoints.push((left, right));
        }

        let roots = compute_roots(&doc.words, &input.links, &endpoints)?;

        for ((l, (left, right)), root) in input.links.into_iter().zip(endpoints).zip(roots) {
            let style = resolve_style(&l.id, &l.style)?;
            doc.links.push(build_link(l, left, right, style, root));
        }

        for c in input.clusters {
            let mut members = Vec::with_capacity(c.members.len());
            for m in &c.members {
                let Some(anchor) = doc.lookup(m) else {
                    let (kind, target) = describe(m);
                    return Err(Error::MalformedClusterMember {
                        cluster: c.id,
                        kind,
                        target: target.to_string(),
                    });
                };
                members.push(anchor);
            }
            doc.clusters.push(Cluster {
                key: c.id,
                label: c.label,
                members,
            });
        }

        tracing::debug!(
            words = doc.words.len(),
            links = doc.links.len(),
            clusters = doc.clusters.len(),
            "resolved annotation document"
        );
        Ok(doc)
    }

    fn lookup(&self, r: &EndpointRef) -> Option<Anchor> {
        match r {
            EndpointRef::Word(id) => self.word_keys.get(id).copied().map(Anchor::Word),
            EndpointRef::Link(id) => self.link_keys.get(id).copied().map(Anchor::Link),
        }
    }

    fn resolve_link_endpoint(&self, link: &str, r: &EndpointRef) -> Result<Anchor> {
        self.lookup(r).ok_or_else(|| {
            let (kind, target) = describe(r);
            Error::MalformedReference {
                link: link.to_string(),
                kind,
                target: target.to_string(),
            }
        })
    }

    /// Drops every word, link, row and cluster.
    pub fn clear(&mut self) {
        self.words.clear();
        self.links.clear();
        self.rows.clear();
        self.clusters.clear();
        self.word_keys.clear();
        self.link_keys.clear();
    }

    pub fn word_id(&self, key: &str) -> Option<WordId> {
        self.word_keys.get(key).copied()
    }

    pub fn link_id(&self, key: &str) -> Option<LinkId> {
        self.link_keys.get(key).copied()
    }

    pub fn word(&self, id: WordId) -> Option<&Word> {
        self.words.get(id.0)
    }

    pub fn word_mut(&mut self, id: WordId) -> Option<&mut Word> {
        self.words.get_mut(id.0)
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id.0)
    }

    pub fn link_mut(&mut self, id: LinkId) -> Option<&mut Link> {
        self.links.get_mut(id.0)
    }

    pub fn word_ids(&self) -> impl Iterator<Item = WordId> + use<> {
        (0..self.words.len()).map(WordId)
    }

    pub fn link_ids(&self) -> impl Iterator<Item = LinkId> + use<> {
        (0..self.links.len()).map(LinkId)
    }

    /// Whether `id` is drawn: it is visible itself and so is every link it is anchored to.
    pub fn is_link_shown(&self, id: LinkId) -> bool {
        let Some(link) = self.link(id) else {
            return false;
        };
        link.visible
            && [link.left, link.right].iter().all(|anchor| match *anchor {
                Anchor::Word(_) => true,
                Anchor::Link(l) => self.is_link_shown(l),
            })
    }

    pub fn set_link_visible(&mut self, id: LinkId, visible: bool) -> Result<()> {
        let link = self.link_mut(id).ok_or(Error::UnknownLink(id))?;
        link.visible = visible;
        tracing::debug!(link = %link.key, visible, "link visibility changed");
        Ok(())
    }

    /// Links ordered so that every link comes after the links it is anchored to.
    pub fn links_in_dependency_order(&self) -> Vec<LinkId> {
        let mut ids: Vec<LinkId> = self.link_ids().collect();
        ids.sort_by_key(|id| (self.links[id.0].depth, id.0));
        ids
    }

    pub fn row(&self, idx: usize) -> Result<&Row> {
        self.rows.get(idx).ok_or(Error::UnknownRow { row: idx })
    }

    pub fn row_of(&self, id: WordId) -> Result<usize> {
        let word = self.word(id).ok_or(Error::UnknownWord(id))?;
        word.row.ok_or_else(|| Error::UnplacedWord {
            word: word.key.clone(),
        })
    }

    /// Inclusive row span `[min_row, max_row]` of a link.
    pub fn link_row_span(&self, id: LinkId) -> Result<(usize, usize)> {
        let link = self.link(id).ok_or(Error::UnknownLink(id))?;
        let min_row = self.row_of(link.root_min_word)?;
        let max_row = self.row_of(link.root_max_word)?;
        if max_row < min_row {
            return Err(Error::InvertedSpan {
                link: link.key.clone(),
                min_row,
                max_row,
            });
        }
        Ok((min_row, max_row))
    }

    /// Inclusive reading-order word span of a link.
    pub fn link_word_span(&self, id: LinkId) -> Result<(usize, usize)> {
        let link = self.link(id).ok_or(Error::UnknownLink(id))?;
        let min = self.word(link.root_min_word).ok_or(Error::UnknownWord(link.root_min_word))?;
        let max = self.word(link.root_max_word).ok_or(Error::UnknownWord(link.root_max_word))?;
        Ok((min.order, max.order))
    }

    /// Re-derives `idx` and every word's `row` back-reference from the row vector.
    pub fn reindex_rows(&mut self) {
        for (idx, row) in self.rows.iter_mut().enumerate() {
            row.idx = idx;
            for id in &row.words {
                if let Some(word) = self.words.get_mut(id.0) {
                    word.row = Some(idx);
                }
            }
        }
    }

    /// Checks the row partition: contiguous indices, no empty rows, every word placed once.
    pub fn validate_rows(&self) -> Result<()> {
        let mut seen = vec![false; self.words.len()];
        for (idx, row) in self.rows.iter().enumerate() {
            if row.words.is_empty() {
                return Err(Error::EmptyRow { row: idx });
            }
            if row.idx != idx {
                return Err(Error::UnknownRow { row: row.idx });
            }
            for id in &row.words {
                let word = self.word(*id).ok_or(Error::UnknownWord(*id))?;
                if word.row != Some(idx) || std::mem::replace(&mut seen[id.0], true) {
                    return Err(Error::UnplacedWord {
                        word: word.key.clone(),
                    });
                }
            }
        }
        if let Some(pos) = seen.iter().position(|placed| !placed) {
            return Err(Error::UnplacedWord {
                word: self.words[pos].key.clone(),
            });
        }
        Ok(())
    }
}

fn describe(r: &EndpointRef) -> (RefKind, &str) {
    match r {
        EndpointRef::Word(id) => (RefKind::Word, id.as_str()),
        EndpointRef::Link(id) => (RefKind::Link, id.as_str()),
    }
}

fn resolve_color(link: &str, value: &str) -> Result<Color> {
    Color::parse(value).ok_or_else(|| Error::InvalidColor {
        link: link.to_string(),
        value: value.to_string(),
    })
}

fn resolve_style(link: &str, style: &LinkStyleInput) -> Result<LinkStyle> {
    let stroke = match &style.stroke {
        StrokeInput::Solid(c) => Stroke::Solid {
            color: resolve_color(link, c)?,
        },
        StrokeInput::Gradient { from, to } => Stroke::Gradient {
            from: resolve_color(link, from)?,
            to: resolve_color(link, to)?,
        },
    };
    Ok(LinkStyle {
        stroke,
        width: style.width,
        opacity: style.opacity,
        dasharray: style.dasharray.clone(),
    })
}

fn build_link(l: LinkInput, left: Anchor, right: Anchor, style: LinkStyle, root: Roots) -> Link {
    Link {
        key: l.id,
        left,
        right,
        direction: l.direction,
        left_attach: l.left_attach,
        right_attach: l.right_attach,
        x1_percent: l.x1_percent.clamp(0.0, 1.0),
        x2_percent: l.x2_percent.clamp(0.0, 1.0),
        style,
        label: l.label.filter(|s| !s.is_empty()),
        visible: l.visible,
        root_min_word: root.min,
        root_max_word: root.max,
        depth: root.depth,
        h: 0,
        lines: Vec::new(),
    }
}

/// Root words and anchor depth for every link; rejects anchor cycles.
fn compute_roots(
    words: &[Word],
    links: &[LinkInput],
    endpoints: &[(Anchor, Anchor)],
) -> Result<Vec<Roots>> {
    fn visit(
        idx: usize,
        words: &[Word],
        links: &[LinkInput],
        endpoints: &[(Anchor, Anchor)],
        state: &mut [Visit],
        out: &mut [Option<Roots>],
    ) -> Result<Roots> {
        match state[idx] {
            Visit::Done => {
                if let Some(r) = out[idx] {
                    return Ok(r);
                }
            }
            Visit::InProgress => {
                return Err(Error::CyclicLink {
                    link: links[idx].id.clone(),
                });
            }
            Visit::Pending => {}
        }
        state[idx] = Visit::InProgress;

        let mut min: Option<WordId> = None;
        let mut max: Option<WordId> = None;
        let mut depth = 1usize;
        let (left, right) = endpoints[idx];
        for anchor in [left, right] {
            let (lo, hi) = match anchor {
                Anchor::Word(w) => (w, w),
                Anchor::Link(l) => {
                    let r = visit(l.0, words, links, endpoints, state, out)?;
                    depth = depth.max(r.depth + 1);
                    (r.min, r.max)
                }
            };
            let order = |w: WordId| words[w.0].order;
            if min.is_none_or(|m| order(lo) < order(m)) {
                min = Some(lo);
            }
            if max.is_none_or(|m| order(hi) > order(m)) {
                max = Some(hi);
            }
        }

        // Both endpoints always yield a word, so min/max are set here.
        let roots = match (min, max) {
            (Some(min), Some(max)) => Roots { min, max, depth },
            _ => {
                return Err(Error::CyclicLink {
                    link: links[idx].id.clone(),
                });
            }
        };
        state[idx] = Visit::Done;
        out[idx] = Some(roots);
        Ok(roots)
    }

    let mut state = vec![Visit::Pending; links.len()];
    let mut out: Vec<Option<Roots>> = vec![None; links.len()];
    let mut roots = Vec::with_capacity(links.len());
    for idx in 0..links.len() {
        roots.push(visit(idx, words, links, endpoints, &mut state, &mut out)?);
    }
    Ok(roots)
}
