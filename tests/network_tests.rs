//! Integration tests for inference, backpropagation, persistence and move selection.

use proptest::prelude::*;
use ttt_nn::game::board::index_to_coords;
use ttt_nn::nn::weights::{load, load_json, save, save_json};
use ttt_nn::nn::{sigmoid, sigmoid_prime};
use ttt_nn::{
    Board, Error, Example, HiddenErrorRule, MoveSelector, NetworkConfig, NeuralNetwork, SeededRng,
    WeightFile,
};

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-12, "{} != {}", a, b);
}

/// Pass-through input layer of two neurons, then one output neuron.
fn tiny_network() -> NeuralNetwork {
    NeuralNetwork::from_weights(
        vec![vec![vec![1.0, 0.0], vec![0.0, 1.0]], vec![vec![0.3, -0.2]]],
        vec![vec![1.0, 1.0], vec![1.0]],
    )
    .unwrap()
}

// =============================================================================
// Forward Tests
// =============================================================================

#[test]
fn test_single_neuron_output() {
    let network =
        NeuralNetwork::from_weights(vec![vec![vec![0.5, 0.25]]], vec![vec![1.0]]).unwrap();
    let out = network.predict(&[1.0, 2.0]).unwrap();

    assert_eq!(out.len(), 1);
    assert_close(out[0], 1.0 / (1.0 + (-1.0f64).exp()));
}

#[test]
fn test_alpha_scales_sum() {
    let network =
        NeuralNetwork::from_weights(vec![vec![vec![1.0]]], vec![vec![3.0]]).unwrap();
    let out = network.predict(&[1.0]).unwrap();
    assert_close(out[0], 1.0 / (1.0 + (-3.0f64).exp()));
}

#[test]
fn test_wrong_input_width() {
    let network = tiny_network();
    let result = network.predict(&[1.0, 2.0, 3.0]);
    assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
}

#[test]
fn test_same_seed_same_network() {
    let config = NetworkConfig::default();
    let a = config.build(&mut SeededRng::new(7));
    let b = config.build(&mut SeededRng::new(7));
    let c = config.build(&mut SeededRng::new(8));

    assert_eq!(a, b);
    assert_ne!(a, c);

    let input = [1.0, -1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0];
    assert_eq!(a.predict(&input).unwrap(), b.predict(&input).unwrap());
}

// =============================================================================
// Backpropagation Tests
// =============================================================================

#[test]
fn test_outer_update_matches_rule() {
    let mut network = tiny_network();
    let lr = 2.0;
    let input = vec![1.0, 0.0];

    let hidden = [sigmoid(1.0, 1.0), sigmoid(1.0, 0.0)];
    let sum = 0.3 * hidden[0] - 0.2 * hidden[1];
    let output = sigmoid(1.0, sum);
    let signal = (1.0 - output) * sigmoid_prime(1.0, output);
    let delta = lr * signal * sigmoid_prime(1.0, sum);

    network.back_prop(&[Example::new(input, vec![1.0])], lr).unwrap();

    let outer = network.layers()[1].neurons()[0].weights();
    assert_close(outer[0], 0.3 + delta);
    assert_close(outer[1], -0.2 + delta);

    // Input layer is never trained.
    assert_eq!(network.layers()[0].neurons()[0].weights(), &[1.0, 0.0]);
}

#[test]
fn test_every_example_trains() {
    let example = Example::new(vec![1.0, 0.0], vec![1.0]);

    let mut once = tiny_network();
    once.back_prop(std::slice::from_ref(&example), 2.0).unwrap();

    let mut twice = tiny_network();
    twice
        .back_prop(&[example.clone(), example], 2.0)
        .unwrap();

    assert_ne!(once, twice);
}

#[test]
fn test_back_prop_rejects_wrong_target_width() {
    let mut network = tiny_network();
    let result = network.back_prop(&[Example::new(vec![1.0, 0.0], vec![1.0, 0.0])], 2.0);
    assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
}

#[test]
fn test_hidden_weights_after_one_example() {
    let mut network = NeuralNetwork::from_weights(
        vec![
            vec![vec![1.0, 1.0], vec![1.0, 1.0]],
            vec![vec![0.2, 0.1], vec![0.1, -0.3]],
            vec![vec![0.5, -0.5]],
        ],
        vec![vec![1.0; 2], vec![1.0; 2], vec![1.0]],
    )
    .unwrap();

    network
        .back_prop(&[Example::new(vec![1.0, 0.0], vec![1.0])], 2.0)
        .unwrap();

    let hidden = network.layers()[1].neurons();
    let expected = [[0.215752, 0.115752], [0.087399, -0.312601]];
    for (neuron, want) in hidden.iter().zip(expected) {
        for (w, e) in neuron.weights().iter().zip(want) {
            assert!((w - e).abs() < 1e-6, "{} != {}", w, e);
        }
    }
}

#[test]
fn test_hidden_layer_wider_than_input_trains() {
    let mut network = NetworkConfig::default()
        .with_hidden_layers(vec![12])
        .build(&mut SeededRng::new(3));
    let base = network.clone();
    let data = [Example::new(
        vec![1.0, -1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    )];

    network.back_prop(&data, 2.0).unwrap();

    assert_eq!(network.layers()[1].len(), 12);
    assert_ne!(network.layers()[1], base.layers()[1]);
    assert_ne!(network.layers()[2], base.layers()[2]);
}

#[test]
fn test_hidden_rules_differ() {
    let base = NetworkConfig::default()
        .with_hidden_layers(vec![4])
        .build(&mut SeededRng::new(3));
    let data = [Example::new(
        vec![1.0, -1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    )];

    let mut transposed = base.clone();
    transposed.back_prop(&data, 2.0).unwrap();

    let mut positional = base
        .clone()
        .with_hidden_rule(HiddenErrorRule::Positional)
        .unwrap();
    positional.back_prop(&data, 2.0).unwrap();

    assert_ne!(transposed.layers()[1], base.layers()[1]);
    assert_ne!(positional.layers()[1], transposed.layers()[1]);
    assert!(NetworkConfig::default()
        .with_hidden_layers(vec![12])
        .build(&mut SeededRng::new(3))
        .with_hidden_rule(HiddenErrorRule::Positional)
        .is_err());
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_json_weight_file_round_trip() {
    let network = NetworkConfig::default().build(&mut SeededRng::new(11));
    let path = std::env::temp_dir().join("ttt-nn-network-tests-weights.json");

    save_json(&network, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n\t\"layers\""));

    let loaded = load_json(&path).unwrap();
    assert_eq!(WeightFile::from_network(&loaded), WeightFile::from_network(&network));
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_snapshot_keeps_hidden_rule() {
    let network = NetworkConfig::default()
        .build(&mut SeededRng::new(12))
        .with_hidden_rule(HiddenErrorRule::Positional)
        .unwrap();
    let path = std::env::temp_dir().join("ttt-nn-network-tests-snapshot.bin");

    save(&network, &path).unwrap();
    let loaded = load(&path).unwrap();
    assert_eq!(loaded, network);
    assert_eq!(loaded.hidden_rule(), HiddenErrorRule::Positional);
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_inconsistent_weight_file_rejected() {
    let file = WeightFile {
        layers: vec![vec![vec![1.0, 1.0]], vec![vec![0.5, 0.5]]],
        alphas: vec![vec![1.0], vec![1.0]],
    };
    assert!(matches!(file.into_network(), Err(Error::ShapeMismatch { .. })));
}

// =============================================================================
// Move Selection Tests
// =============================================================================

proptest! {
    #[test]
    fn prop_network_picks_empty_cell(seed in 0u64..1000, opening in proptest::collection::vec(0usize..9, 0..8)) {
        let network = NetworkConfig::default().build(&mut SeededRng::new(seed));
        let selector = MoveSelector::default();

        let mut board = Board::new();
        for i in opening {
            let (x, y) = index_to_coords(i);
            let _ = board.play(x, y);
        }
        prop_assume!(!board.is_terminal());

        let (x, y) = selector.best_move(&board, &network).unwrap();
        prop_assert!(board.cell(x, y).unwrap().is_empty());
        prop_assert!(board.legal_moves().contains(&(x, y)));
    }
}
