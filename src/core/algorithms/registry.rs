use crate::core::algorithms::{
    BogoSort, BubbleSort, CocktailSort, HeapSort, InsertionSort, MergeSort, QuickSort,
    ShellSort, SortAlgorithm, TreeSort,
};
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm {
    pub name: String,
}

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no algorithm registered under \"{}\"", self.name)
    }
}

impl Error for UnknownAlgorithm {}

struct RegistryEntry {
    name: &'static str,
    factory: fn() -> Box<dyn SortAlgorithm>,
}

/// Explicit factory map for the available strategies. Built once at
/// startup and passed by reference; there is no global registry.
pub struct AlgorithmRegistry {
    entries: Vec<RegistryEntry>,
}

impl AlgorithmRegistry {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// All nine strategies in display order.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register("Bubble Sort", || Box::new(BubbleSort::new()));
        registry.register("Insertion Sort", || Box::new(InsertionSort::new()));
        registry.register("Shell Sort", || Box::new(ShellSort::new()));
        registry.register("Cocktail Sort", || Box::new(CocktailSort::new()));
        registry.register("Quick Sort", || Box::new(QuickSort::new()));
        registry.register("Merge Sort", || Box::new(MergeSort::new()));
        registry.register("Heap Sort", || Box::new(HeapSort::new()));
        registry.register("Tree Sort", || Box::new(TreeSort::new()));
        registry.register("Bogo Sort", || Box::new(BogoSort::new()));
        registry
    }

    pub fn register(&mut self, name: &'static str, factory: fn() -> Box<dyn SortAlgorithm>) {
        self.entries.push(RegistryEntry { name, factory });
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn SortAlgorithm>, UnknownAlgorithm> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| (entry.factory)())
            .ok_or_else(|| UnknownAlgorithm {
                name: name.to_owned(),
            })
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.name).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
