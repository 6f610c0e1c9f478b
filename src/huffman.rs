//! Huffman coding over an arena-allocated tree.
//!
//! Nodes live in a [`SlotMap`] and refer to their children by key, so a tree
//! owns all of its nodes and can be cloned or dropped as a unit. The priority
//! queue orders nodes by `(frequency, creation sequence)`: leaves are created
//! in order of first appearance in the text, internal nodes as they are
//! merged. That makes tree shape and codes fully deterministic.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use ahash::AHashMap as HashMap;
use slotmap::{DefaultKey, SlotMap};

use crate::error::{Error, Result};
use crate::metrics::{Recorder, Run};

/// A node of the Huffman tree. Leaves carry a character, internal nodes two
/// children.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HuffmanNode {
    pub ch: Option<char>,
    pub freq: usize,
    pub left: Option<DefaultKey>,
    pub right: Option<DefaultKey>,
}

impl HuffmanNode {
    fn leaf(ch: char, freq: usize) -> Self {
        Self {
            ch: Some(ch),
            freq,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn label(&self) -> NodeLabel {
        NodeLabel {
            ch: self.ch,
            freq: self.freq,
        }
    }
}

/// Character and frequency of a node, as shown in queue snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeLabel {
    pub ch: Option<char>,
    pub freq: usize,
}

/// One entry of [`HuffmanTree::layout`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeSummary {
    pub ch: Option<char>,
    pub freq: usize,
    /// The code of a leaf; `None` for internal nodes.
    pub code: Option<String>,
}

/// A built Huffman tree.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HuffmanTree {
    nodes: SlotMap<DefaultKey, HuffmanNode>,
    root: DefaultKey,
}

impl HuffmanTree {
    pub fn root(&self) -> &HuffmanNode {
        &self.nodes[self.root]
    }

    pub fn node(&self, key: DefaultKey) -> Option<&HuffmanNode> {
        self.nodes.get(key)
    }

    /// Number of nodes, leaves and internal.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node keyed by its path from the root (`0` left, `1` right).
    ///
    /// The root is keyed by the empty string.
    pub fn layout(&self) -> BTreeMap<String, NodeSummary> {
        let mut layout = BTreeMap::new();
        let mut stack = vec![(self.root, String::new())];
        while let Some((key, path)) = stack.pop() {
            let node = &self.nodes[key];
            if let (Some(left), Some(right)) = (node.left, node.right) {
                stack.push((left, format!("{path}0")));
                stack.push((right, format!("{path}1")));
            }
            let code = node.is_leaf().then(|| path.clone());
            layout.insert(
                path,
                NodeSummary {
                    ch: node.ch,
                    freq: node.freq,
                    code,
                },
            );
        }
        layout
    }

    /// Leaf codes in left-to-right order.
    fn codes(&self) -> Vec<(char, String)> {
        let mut codes = Vec::new();
        let mut stack = vec![(self.root, String::new())];
        while let Some((key, code)) = stack.pop() {
            let node = &self.nodes[key];
            match (node.left, node.right, node.ch) {
                (Some(left), Some(right), _) => {
                    stack.push((right, format!("{code}1")));
                    stack.push((left, format!("{code}0")));
                }
                (_, _, Some(ch)) => codes.push((ch, code)),
                _ => {}
            }
        }
        codes
    }
}

/// How the decoder moved for one bit, or which character it emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DecodeMove {
    Left,
    Right,
    Emit(char),
}

/// One state transition of the coder.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum HuffmanStep {
    /// Character frequencies in order of first appearance.
    Init { frequencies: Vec<(char, usize)> },
    /// The queue of leaves, lowest priority first.
    Heap { queue: Vec<NodeLabel> },
    /// The two minimum nodes about to be merged.
    Extract { left: NodeLabel, right: NodeLabel },
    /// The queue after the merged node was pushed.
    Insert { queue: Vec<NodeLabel> },
    Code { ch: char, code: String },
    FinalTree {
        layout: BTreeMap<String, NodeSummary>,
    },
    Codes { codes: BTreeMap<char, String> },
    Encode { text: String, bits: String },
    Decode {
        bits: String,
        text: String,
        walk: Vec<DecodeMove>,
    },
}

/// Output of [`HuffmanCoder::encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Encoded {
    /// Encoded text as a string of `0`/`1` characters.
    pub bits: String,
    pub codes: BTreeMap<char, String>,
}

/// Priority queue entry: a min-heap by frequency, then creation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    freq: usize,
    seq: usize,
    key: DefaultKey,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Builds trees, encodes and decodes.
///
/// The last built tree and its code table are retained; [`encode`] reuses
/// them and only builds when none exists.
///
/// [`encode`]: HuffmanCoder::encode
#[derive(Debug, Clone, Default)]
pub struct HuffmanCoder {
    tree: Option<HuffmanTree>,
    codes: HashMap<char, String>,
}

impl HuffmanCoder {
    pub const NAME: &'static str = "Huffman Coding";

    pub fn new() -> Self {
        Self::default()
    }

    /// The retained tree, if one has been built from non-empty text.
    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    /// Code of `ch` in the retained tree.
    pub fn code(&self, ch: char) -> Option<&str> {
        self.codes.get(&ch).map(String::as_str)
    }

    /// Builds and retains the tree for `text`, replacing any previous one.
    ///
    /// Empty text leaves the coder without a tree and records nothing.
    pub fn build_tree(&mut self, text: &str) -> Run<HuffmanStep> {
        let mut rec = Recorder::new(Self::NAME);
        self.build(text, &mut rec);
        rec.finish()
    }

    /// Encodes `text` with the retained tree, building one first if needed.
    ///
    /// Fails with [`Error::UnknownSymbol`] if the retained tree was built from
    /// a text that lacks one of the characters.
    pub fn encode(&mut self, text: &str) -> Result<(Encoded, Run<HuffmanStep>)> {
        let mut rec = Recorder::new(Self::NAME);
        if self.tree.is_none() {
            self.build(text, &mut rec);
        }
        tracing::debug!(chars = text.chars().count(), "huffman encode");

        rec.start_clock();
        let mut bits = String::new();
        for ch in text.chars() {
            rec.count_operation();
            let code = self.codes.get(&ch).ok_or(Error::UnknownSymbol { ch })?;
            bits.push_str(code);
        }
        rec.stop_clock();

        rec.record(HuffmanStep::Encode {
            text: text.to_owned(),
            bits: bits.clone(),
        });
        let encoded = Encoded {
            bits,
            codes: self.code_table(),
        };
        Ok((encoded, rec.finish()))
    }

    /// Decodes `bits` by walking `tree` from the root, restarting at every
    /// leaf.
    ///
    /// No tree or no bits decode to the empty string. Any character other
    /// than `0`/`1` is rejected before decoding starts, as are bits that end
    /// in the middle of a code and any bit against a one-node tree.
    pub fn decode(
        &self,
        bits: &str,
        tree: Option<&HuffmanTree>,
    ) -> Result<(String, Run<HuffmanStep>)> {
        let mut rec = Recorder::new(Self::NAME);
        let tree = match tree {
            Some(tree) if !bits.is_empty() => tree,
            _ => return Ok((String::new(), rec.finish())),
        };
        if let Some((position, bit)) = bits.chars().enumerate().find(|&(_, b)| b != '0' && b != '1')
        {
            return Err(Error::InvalidBit { bit, position });
        }
        tracing::debug!(bits = bits.len(), "huffman decode");

        rec.start_clock();
        let mut text = String::new();
        let mut walk = Vec::new();
        let mut current = tree.root;
        for (position, bit) in bits.chars().enumerate() {
            rec.count_operation();
            let node = &tree.nodes[current];
            let (next, step) = if bit == '0' {
                (node.left, DecodeMove::Left)
            } else {
                (node.right, DecodeMove::Right)
            };
            current = next.ok_or(Error::InvalidCode { position })?;
            walk.push(step);

            let node = &tree.nodes[current];
            if node.is_leaf() {
                if let Some(ch) = node.ch {
                    text.push(ch);
                    walk.push(DecodeMove::Emit(ch));
                }
                current = tree.root;
            }
        }
        rec.stop_clock();

        if current != tree.root {
            return Err(Error::InvalidCode {
                position: bits.len(),
            });
        }
        rec.record(HuffmanStep::Decode {
            bits: bits.to_owned(),
            text: text.clone(),
            walk,
        });
        Ok((text, rec.finish()))
    }

    fn code_table(&self) -> BTreeMap<char, String> {
        self.codes
            .iter()
            .map(|(&ch, code)| (ch, code.clone()))
            .collect()
    }

    fn build(&mut self, text: &str, rec: &mut Recorder<HuffmanStep>) {
        self.tree = None;
        self.codes.clear();
        if text.is_empty() {
            return;
        }

        let mut counts: HashMap<char, usize> = HashMap::default();
        let mut order = Vec::new();
        for ch in text.chars() {
            let count = counts.entry(ch).or_insert(0);
            if *count == 0 {
                order.push(ch);
            }
            *count += 1;
        }
        let frequencies: Vec<(char, usize)> = order.iter().map(|&ch| (ch, counts[&ch])).collect();
        tracing::debug!(distinct = frequencies.len(), "huffman build");
        rec.record(HuffmanStep::Init {
            frequencies: frequencies.clone(),
        });

        rec.start_clock();
        let mut nodes = SlotMap::with_capacity(2 * frequencies.len());
        let mut heap = BinaryHeap::with_capacity(frequencies.len());
        let mut seq = 0;
        for &(ch, freq) in &frequencies {
            let key = nodes.insert(HuffmanNode::leaf(ch, freq));
            heap.push(QueueEntry { freq, seq, key });
            seq += 1;
        }
        rec.record(HuffmanStep::Heap {
            queue: queue_snapshot(&heap, &nodes),
        });

        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };
            rec.count_operation();
            rec.record(HuffmanStep::Extract {
                left: nodes[left.key].label(),
                right: nodes[right.key].label(),
            });

            let freq = left.freq + right.freq;
            let key = nodes.insert(HuffmanNode {
                ch: None,
                freq,
                left: Some(left.key),
                right: Some(right.key),
            });
            heap.push(QueueEntry { freq, seq, key });
            seq += 1;
            rec.record(HuffmanStep::Insert {
                queue: queue_snapshot(&heap, &nodes),
            });
        }
        rec.note_space(nodes.len() as u64);

        let Some(root) = heap.pop() else {
            return;
        };
        let tree = HuffmanTree {
            nodes,
            root: root.key,
        };
        for (ch, code) in tree.codes() {
            rec.record(HuffmanStep::Code {
                ch,
                code: code.clone(),
            });
            self.codes.insert(ch, code);
        }
        rec.stop_clock();

        rec.record(HuffmanStep::FinalTree {
            layout: tree.layout(),
        });
        self.tree = Some(tree);
        rec.record(HuffmanStep::Codes {
            codes: self.code_table(),
        });
    }
}

/// Original size over encoded size, counting 8 bits per character.
///
/// Returns 0 for an empty bit string.
pub fn compression_ratio(original: &str, bits: &str) -> f64 {
    if bits.is_empty() {
        return 0.0;
    }
    (original.chars().count() * 8) as f64 / bits.len() as f64
}

fn queue_snapshot(
    heap: &BinaryHeap<QueueEntry>,
    nodes: &SlotMap<DefaultKey, HuffmanNode>,
) -> Vec<NodeLabel> {
    let mut entries: Vec<&QueueEntry> = heap.iter().collect();
    entries.sort_by_key(|e| (e.freq, e.seq));
    entries.into_iter().map(|e| nodes[e.key].label()).collect()
}
