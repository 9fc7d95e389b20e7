//! Fixed-topology feedforward controller network.
//!
//! The topology is fixed at 5 inputs (food bearing, food distance, velocity
//! x, velocity y, bias), 4 hidden units, and 2 outputs (turn, speed), all
//! with tanh activation. Weights are stored flattened layer-major: the
//! input-to-hidden block first, then the hidden-to-output block.

use crate::engine::rng::WeightRng;

/// Observation vector length.
pub const INPUT_SIZE: usize = 5;
/// Hidden layer width.
pub const HIDDEN_SIZE: usize = 4;
/// Action vector length.
pub const OUTPUT_SIZE: usize = 2;
/// Total number of connection weights.
pub const WEIGHT_COUNT: usize = INPUT_SIZE * HIDDEN_SIZE + HIDDEN_SIZE * OUTPUT_SIZE;

/// Every weight is kept within [-WEIGHT_LIMIT, WEIGHT_LIMIT].
pub const WEIGHT_LIMIT: f32 = 2.0;

/// Action returned for a malformed observation: no turn, half forward speed.
pub const NEUTRAL_ACTION: [f32; OUTPUT_SIZE] = [0.0, 0.5];

const HIDDEN_TO_OUTPUT_OFFSET: usize = INPUT_SIZE * HIDDEN_SIZE;

#[inline]
fn hidden_weight(unit: usize, input: usize) -> usize {
    unit * INPUT_SIZE + input
}

#[inline]
fn output_weight(unit: usize, hidden: usize) -> usize {
    HIDDEN_TO_OUTPUT_OFFSET + unit * HIDDEN_SIZE + hidden
}

/// Feedforward controller with a flat weight vector.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuralNetwork {
    weights: Vec<f32>,
}

impl NeuralNetwork {
    /// Create a network with every weight drawn uniformly from [-1, 1].
    pub fn random(rng: &mut WeightRng) -> Self {
        let weights = (0..WEIGHT_COUNT).map(|_| rng.weight()).collect();
        Self { weights }
    }

    /// Create a network from an existing weight vector.
    ///
    /// # Panics
    ///
    /// Panics if the vector length does not match the fixed topology.
    pub fn with_weights(weights: Vec<f32>) -> Self {
        assert_eq!(
            weights.len(),
            WEIGHT_COUNT,
            "weight vector length must match the fixed topology"
        );
        Self { weights }
    }

    /// The flattened weight vector.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Forward pass: observation in, action out.
    ///
    /// A malformed observation (wrong length) yields the neutral action
    /// rather than a panic; the condition is logged so callers can spot it.
    pub fn predict(&self, inputs: &[f32]) -> [f32; OUTPUT_SIZE] {
        if inputs.len() != INPUT_SIZE {
            log::warn!(
                "observation has length {}, expected {}; returning neutral action",
                inputs.len(),
                INPUT_SIZE
            );
            return NEUTRAL_ACTION;
        }
        let (_, outputs) = self.forward(inputs);
        outputs
    }

    fn forward(&self, inputs: &[f32]) -> ([f32; HIDDEN_SIZE], [f32; OUTPUT_SIZE]) {
        let mut hidden = [0.0f32; HIDDEN_SIZE];
        for (i, h) in hidden.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (j, input) in inputs.iter().enumerate() {
                sum += input * self.weights[hidden_weight(i, j)];
            }
            *h = sum.tanh();
        }

        let mut outputs = [0.0f32; OUTPUT_SIZE];
        for (i, out) in outputs.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (j, h) in hidden.iter().enumerate() {
                sum += h * self.weights[output_weight(i, j)];
            }
            *out = sum.tanh();
        }

        (hidden, outputs)
    }

    /// One reward-weighted backpropagation step toward (or away from) the
    /// action actually taken.
    ///
    /// The target is `action_taken`; the output error is scaled by
    /// `reward_sign` (+1 reinforces the action, -1 pushes away from it).
    /// Deltas use the tanh derivative, and every updated weight is clamped
    /// to [-WEIGHT_LIMIT, WEIGHT_LIMIT].
    pub fn local_adjust(
        &mut self,
        inputs: &[f32; INPUT_SIZE],
        action_taken: &[f32; OUTPUT_SIZE],
        reward_sign: f32,
        learning_rate: f32,
    ) {
        let (hidden, outputs) = self.forward(inputs);

        let mut output_deltas = [0.0f32; OUTPUT_SIZE];
        for (i, delta) in output_deltas.iter_mut().enumerate() {
            let error = (action_taken[i] - outputs[i]) * reward_sign;
            *delta = error * (1.0 - outputs[i] * outputs[i]);
        }

        let mut hidden_deltas = [0.0f32; HIDDEN_SIZE];
        for (i, delta) in hidden_deltas.iter_mut().enumerate() {
            let mut error = 0.0;
            for (j, output_delta) in output_deltas.iter().enumerate() {
                error += output_delta * self.weights[output_weight(j, i)];
            }
            *delta = error * (1.0 - hidden[i] * hidden[i]);
        }

        for (i, output_delta) in output_deltas.iter().enumerate() {
            for (j, h) in hidden.iter().enumerate() {
                let index = output_weight(i, j);
                let gradient = output_delta * h;
                self.weights[index] = (self.weights[index] + learning_rate * gradient)
                    .clamp(-WEIGHT_LIMIT, WEIGHT_LIMIT);
            }
        }

        for (i, hidden_delta) in hidden_deltas.iter().enumerate() {
            for (j, input) in inputs.iter().enumerate() {
                let index = hidden_weight(i, j);
                let gradient = hidden_delta * input;
                self.weights[index] = (self.weights[index] + learning_rate * gradient)
                    .clamp(-WEIGHT_LIMIT, WEIGHT_LIMIT);
            }
        }
    }
}
