use crate::huffman::HuffmanCoder;
use crate::knapsack::Knapsack;
use crate::sort::{SortAlgorithm, Sorter};

#[test]
fn test_sort_run_serializes() {
    let (_, run) = SortAlgorithm::Insertion.sort(&[3, 1, 2]);
    let json = serde_json::to_value(&run).unwrap();
    assert_eq!(json["algorithm"], "Insertion Sort");
    assert_eq!(json["steps"][0]["Initial"]["array"], serde_json::json!([3, 1, 2]));
    assert_eq!(json["steps"].as_array().map(Vec::len), Some(run.len()));
    assert_eq!(json["metrics"]["comparisons"], run.metrics().comparisons);
}

#[test]
fn test_knapsack_steps_serialize() {
    let (_, run) = Knapsack.solve(&[1], &[5], 1).unwrap();
    let json = serde_json::to_value(run.steps()).unwrap();
    assert_eq!(json[2]["Fill"]["decision"], "Include");
}

#[test]
fn test_huffman_tree_serializes() {
    let mut coder = HuffmanCoder::new();
    coder.build_tree("aab");
    let tree = coder.tree().unwrap();
    let json = serde_json::to_value(tree).unwrap();
    assert!(json.get("nodes").is_some());
    assert!(json.get("root").is_some());
}
