use std::collections::VecDeque;

use bit_set::BitSet;
use itertools::Itertools;
use tracing::{debug, trace};

use super::WorklistOrder;

/// Identifies a block in the arena of a [`Refinement`]. Identifiers are never reused, once a
/// block is split its identifier is retired for good.
pub(crate) type BlockId = usize;

/// Predecessor lists indexed first by symbol and then by target state, all states are given
/// by their dense index.
pub(crate) type PredecessorTable = Vec<Vec<Vec<usize>>>;

/// The state of a running partition refinement over states `0..size`. Blocks live in an arena
/// of bitsets, a retired block is `None`. The worklist may hold stale identifiers, the set of
/// pending identifiers is what counts.
#[derive(Debug, Clone)]
pub(crate) struct Refinement {
    size: usize,
    blocks: Vec<Option<BitSet>>,
    block_of: Vec<BlockId>,
    worklist: VecDeque<BlockId>,
    pending: BitSet,
    order: WorklistOrder,
    splits: usize,
}

impl Refinement {
    /// Sets up the refinement with the initial split into `accepting` and `rejecting` states,
    /// which together must cover `0..size`. Empty blocks are left out. The worklist starts with
    /// the smaller of the two blocks, on a tie it is `rejecting`. If `accepting` is empty it is
    /// the smaller one and the worklist starts out empty, if only `rejecting` is empty the
    /// accepting block is enqueued.
    pub(crate) fn new(
        size: usize,
        accepting: BitSet,
        rejecting: BitSet,
        order: WorklistOrder,
    ) -> Self {
        let mut out = Self {
            size,
            blocks: Vec::with_capacity(2),
            block_of: vec![0; size],
            worklist: VecDeque::new(),
            pending: BitSet::new(),
            order,
            splits: 0,
        };

        // an empty accepting block wins the size comparison, so nothing is enqueued then
        let accepting_is_smaller = accepting.len() < rejecting.len();
        let accepting = (!accepting.is_empty()).then(|| out.allocate(accepting));
        let rejecting = (!rejecting.is_empty()).then(|| out.allocate(rejecting));
        let splitter = match (accepting, rejecting) {
            (Some(acc), None) => Some(acc),
            (_, Some(_)) if accepting_is_smaller => accepting,
            (_, rej) => rej,
        };
        if let Some(id) = splitter {
            out.enqueue(id);
        }
        trace!(
            "initial partition has {} blocks, worklist {:?}",
            out.block_count(),
            out.worklist
        );
        out
    }

    fn allocate(&mut self, block: BitSet) -> BlockId {
        let id = self.blocks.len();
        for q in block.iter() {
            self.block_of[q] = id;
        }
        self.blocks.push(Some(block));
        id
    }

    fn enqueue(&mut self, id: BlockId) {
        if self.pending.insert(id) {
            self.worklist.push_back(id);
        }
    }

    /// Removes the next live splitter from the worklist and returns a copy of its states.
    fn next_splitter(&mut self) -> Option<(BlockId, BitSet)> {
        loop {
            let id = match self.order {
                WorklistOrder::Lifo => self.worklist.pop_back(),
                WorklistOrder::Fifo => self.worklist.pop_front(),
            }?;
            if !self.pending.remove(id) {
                continue;
            }
            if let Some(block) = self.blocks[id].as_ref() {
                return Some((id, block.clone()));
            }
        }
    }

    /// Runs the refinement to completion, `predecessors` must have one entry per state for
    /// every symbol.
    pub(crate) fn run(&mut self, predecessors: &PredecessorTable) {
        let mut splitters = 0usize;
        while let Some((id, splitter)) = self.next_splitter() {
            splitters += 1;
            trace!("using block {id} with {} states as splitter", splitter.len());

            for by_target in predecessors {
                let mut reaching = BitSet::with_capacity(self.size);
                for q in splitter.iter() {
                    reaching.extend(by_target[q].iter().copied());
                }
                if reaching.is_empty() {
                    continue;
                }

                // only blocks that intersect the predecessors can be split
                let touched = reaching
                    .iter()
                    .map(|p| self.block_of[p])
                    .unique()
                    .collect_vec();
                for block in touched {
                    self.split(block, &reaching);
                }
            }
        }
        debug!(
            "refinement used {splitters} splitters and performed {} splits, {} blocks remain",
            self.splits,
            self.block_count()
        );
    }

    /// Splits the block `id` into the states that lie in `reaching` and those that do not,
    /// provided both parts are non-empty.
    fn split(&mut self, id: BlockId, reaching: &BitSet) {
        let Some(block) = self.blocks[id].as_ref() else {
            return;
        };
        let inside: BitSet = block.intersection(reaching).collect();
        if inside.is_empty() || inside.len() == block.len() {
            return;
        }
        let outside: BitSet = block.difference(&inside).collect();
        let (inside_len, outside_len) = (inside.len(), outside.len());

        self.blocks[id] = None;
        self.splits += 1;
        let inside_id = self.allocate(inside);
        let outside_id = self.allocate(outside);
        trace!("split block {id} into {inside_id} ({inside_len}) and {outside_id} ({outside_len})");

        if self.pending.remove(id) {
            self.enqueue(inside_id);
            self.enqueue(outside_id);
        } else if inside_len <= outside_len {
            self.enqueue(inside_id);
        } else {
            self.enqueue(outside_id);
        }
    }

    /// The number of live blocks.
    pub(crate) fn block_count(&self) -> usize {
        self.blocks.iter().flatten().count()
    }

    /// Consumes the refinement and returns the live blocks.
    pub(crate) fn into_blocks(self) -> Vec<BitSet> {
        self.blocks.into_iter().flatten().collect()
    }
}
