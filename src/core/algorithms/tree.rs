use crate::core::algorithms::SortAlgorithm;
use crate::core::data::ElementState;
use crate::core::step::StepContext;

/// Arena-allocated BST node: children are indices into the node vector.
#[derive(Debug, Clone, Copy)]
struct TreeNode {
    value: i32,
    left: Option<usize>,
    right: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Highlight the next element to insert into the tree.
    PickElement,
    /// Descend from the root and attach the picked element.
    Insert,
    /// All elements inserted; set up the in-order traversal.
    TraversalPrep,
    /// Push the left spine from the current node onto the stack.
    DescendLeft,
    /// Pop a node and write its value back into the dataset.
    VisitNode,
    /// Turn towards the visited node's right subtree.
    DescendRight,
}

/// Tree sort: build a binary search tree from the input (duplicates go
/// right), then write values back in order via an explicit-stack in-order
/// traversal.
#[derive(Debug)]
pub struct TreeSort {
    len: usize,
    nodes: Vec<TreeNode>,
    root: Option<usize>,
    next_insert: usize,
    traversal_stack: Vec<usize>,
    cursor: Option<usize>,
    place_index: usize,
    sorted: bool,
    halted: bool,
    phase: Phase,
}

impl TreeSort {
    #[must_use]
    pub fn new() -> Self {
        let mut algorithm = Self {
            len: 0,
            nodes: Vec::new(),
            root: None,
            next_insert: 0,
            traversal_stack: Vec::new(),
            cursor: None,
            place_index: 0,
            sorted: false,
            halted: false,
            phase: Phase::PickElement,
        };
        algorithm.reset(0);
        algorithm
    }

    fn step_pick_element(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.next_insert < self.len {
            ctx.set_state(self.next_insert, ElementState::Pivot);
            self.phase = Phase::Insert;
            ctx.request_visual_update();
            return true;
        }

        ctx.reset_range(0..self.len);
        self.phase = Phase::TraversalPrep;
        ctx.request_visual_update();
        true
    }

    fn step_insert(&mut self, ctx: &mut StepContext<'_>) -> bool {
        let value = ctx.value(self.next_insert);
        let node = TreeNode {
            value,
            left: None,
            right: None,
        };
        let id = self.nodes.len();
        self.nodes.push(node);

        match self.root {
            None => self.root = Some(id),
            Some(root) => {
                let mut current = root;
                loop {
                    if value < self.nodes[current].value {
                        match self.nodes[current].left {
                            Some(next) => current = next,
                            None => {
                                self.nodes[current].left = Some(id);
                                break;
                            }
                        }
                    } else {
                        // Duplicates descend right, so the in-order pass
                        // visits them in insertion order.
                        match self.nodes[current].right {
                            Some(next) => current = next,
                            None => {
                                self.nodes[current].right = Some(id);
                                break;
                            }
                        }
                    }
                }
            }
        }

        ctx.set_state(self.next_insert, ElementState::Normal);
        self.next_insert += 1;
        self.phase = Phase::PickElement;
        ctx.request_visual_update();
        true
    }

    fn step_descend_left(&mut self) -> bool {
        while let Some(id) = self.cursor {
            self.traversal_stack.push(id);
            self.cursor = self.nodes[id].left;
        }
        self.phase = Phase::VisitNode;
        true
    }

    fn step_visit_node(&mut self, ctx: &mut StepContext<'_>) -> bool {
        let Some(id) = self.traversal_stack.pop() else {
            self.sorted = true;
            ctx.complete();
            return false;
        };

        ctx.set_value(self.place_index, self.nodes[id].value);
        ctx.set_state(self.place_index, ElementState::Sorted);
        self.place_index += 1;
        self.cursor = self.nodes[id].right;
        self.phase = Phase::DescendRight;
        ctx.request_visual_update();
        true
    }
}

impl Default for TreeSort {
    fn default() -> Self {
        Self::new()
    }
}

impl SortAlgorithm for TreeSort {
    fn name(&self) -> &'static str {
        "Tree Sort"
    }

    fn reset(&mut self, len: usize) {
        self.len = len;
        self.nodes.clear();
        self.root = None;
        self.next_insert = 0;
        self.traversal_stack.clear();
        self.cursor = None;
        self.place_index = 0;
        self.sorted = len <= 1;
        self.halted = false;
        self.phase = Phase::PickElement;
    }

    fn next_step(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.sorted {
            ctx.complete();
            return false;
        }
        if self.halted {
            return false;
        }
        if ctx.is_stop_requested() {
            ctx.clear_transient_marks();
            self.halted = true;
            return false;
        }

        match self.phase {
            Phase::PickElement => self.step_pick_element(ctx),
            Phase::Insert => self.step_insert(ctx),
            Phase::TraversalPrep => {
                self.cursor = self.root;
                self.phase = Phase::DescendLeft;
                true
            }
            Phase::DescendLeft => self.step_descend_left(),
            Phase::VisitNode => self.step_visit_node(ctx),
            Phase::DescendRight => {
                // The cursor already points at the right child (possibly
                // none); resume spine-pushing from there.
                self.phase = Phase::DescendLeft;
                true
            }
        }
    }

    fn is_sorted(&self) -> bool {
        self.sorted
    }
}
