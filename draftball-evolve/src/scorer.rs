//! Preference scorer - a fixed-topology feed-forward evaluator
//!
//! The scorer is nothing more than a flat parameter vector with an explicit
//! forward pass: 8 inputs, two logistic hidden layers of 10 and 5 units, one
//! raw output. Evaluation is a pure function of the parameters and inputs;
//! mutation perturbs every parameter independently.

use rand::Rng;

/// Input features: four candidate skills plus four team averages
pub const NUM_INPUTS: usize = 8;

const HIDDEN_1: usize = 10;
const HIDDEN_2: usize = 5;

/// Bias plus incoming weights for every unit across the three layers
const NUM_PARAMS: usize =
    HIDDEN_1 * (NUM_INPUTS + 1) + HIDDEN_2 * (HIDDEN_1 + 1) + (HIDDEN_2 + 1);

#[derive(Clone, Debug, PartialEq)]
pub struct Scorer {
    params: Vec<f64>,
}

impl Scorer {
    /// Fresh scorer with parameters drawn uniformly from [-1, 1)
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let params = (0..NUM_PARAMS).map(|_| rng.gen_range(-1.0..1.0)).collect();
        Self { params }
    }

    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Forward pass over the 8-feature vector
    pub fn evaluate(&self, inputs: &[f64; NUM_INPUTS]) -> f64 {
        let mut idx = 0;

        let mut hidden_1 = [0.0f64; HIDDEN_1];
        for unit in hidden_1.iter_mut() {
            let mut sum = self.params[idx];
            idx += 1;
            for &x in inputs {
                sum += self.params[idx] * x;
                idx += 1;
            }
            *unit = sigmoid(sum);
        }

        let mut hidden_2 = [0.0f64; HIDDEN_2];
        for unit in hidden_2.iter_mut() {
            let mut sum = self.params[idx];
            idx += 1;
            for &h in &hidden_1 {
                sum += self.params[idx] * h;
                idx += 1;
            }
            *unit = sigmoid(sum);
        }

        // Output unit stays raw; scores are compared, never interpreted
        let mut out = self.params[idx];
        idx += 1;
        for &h in &hidden_2 {
            out += self.params[idx] * h;
            idx += 1;
        }
        out
    }

    /// Copy with every parameter nudged by independent uniform noise on
    /// [-rate, +rate)
    pub fn mutated<R: Rng>(&self, rate: f64, rng: &mut R) -> Self {
        let params = self
            .params
            .iter()
            .map(|w| w + rng.gen_range(-rate..rate))
            .collect();
        Self { params }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
