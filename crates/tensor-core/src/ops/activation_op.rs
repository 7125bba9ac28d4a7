// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Activation functions.
//!
//! All activations are element-wise except [`Activation::Softmax`], which
//! normalises over the channel axis of each `(h, w, b)` position.

use super::{check_output, Kernel};
use crate::{Data2D, Dimension, TensorError};

/// The activation functions a sequential model can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Activation {
    /// `max(0, x)`.
    ReLu,
    /// `x` for `x > 0`, else `exp(x) - 1`.
    ELu,
    /// `clip(0.2 * x + 0.5, 0, 1)`.
    HardSigmoid,
    /// `1 / (1 + exp(-x))`.
    Sigmoid,
    /// `ln(1 + exp(x))`.
    SoftPlus,
    /// `x / (1 + |x|)`.
    SoftSign,
    /// `tanh(x)`.
    TanH,
    /// Softmax over channels.
    Softmax,
}

impl Activation {
    /// Every supported activation, in declaration order.
    pub const ALL: [Activation; 8] = [
        Self::ReLu,
        Self::ELu,
        Self::HardSigmoid,
        Self::Sigmoid,
        Self::SoftPlus,
        Self::SoftSign,
        Self::TanH,
        Self::Softmax,
    ];

    /// Returns the descriptor name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReLu => "ReLu",
            Self::ELu => "ELu",
            Self::HardSigmoid => "HardSigmoid",
            Self::Sigmoid => "Sigmoid",
            Self::SoftPlus => "SoftPlus",
            Self::SoftSign => "SoftSign",
            Self::TanH => "TanH",
            Self::Softmax => "Softmax",
        }
    }

    fn apply(self, x: f64) -> f64 {
        match self {
            Self::ReLu => x.max(0.0),
            Self::ELu => {
                if x > 0.0 {
                    x
                } else {
                    x.exp_m1()
                }
            }
            Self::HardSigmoid => (0.2 * x + 0.5).clamp(0.0, 1.0),
            Self::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Self::SoftPlus => x.max(0.0) + (-x.abs()).exp().ln_1p(),
            Self::SoftSign => x / (1.0 + x.abs()),
            Self::TanH => x.tanh(),
            Self::Softmax => unreachable!("softmax is not element-wise"),
        }
    }
}

impl std::fmt::Display for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applies `kind` to `input`, writing into `output` of the same shape.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if the shapes differ.
pub fn activation(kind: Activation, input: &Data2D, output: &mut Data2D) -> Result<(), TensorError> {
    check_output("activation", input.dimension(), output)?;

    if kind == Activation::Softmax {
        softmax_channels(input, output);
        return Ok(());
    }

    for (d, &s) in output.as_mut_slice().iter_mut().zip(input.as_slice()) {
        *d = kind.apply(s);
    }
    Ok(())
}

/// Numerically stable softmax over the channel axis.
fn softmax_channels(input: &Data2D, output: &mut Data2D) {
    let dim = input.dimension();
    if dim.c == 0 {
        return;
    }

    for b in 0..dim.b {
        for h in 0..dim.h {
            for w in 0..dim.w {
                let max_val = (0..dim.c)
                    .map(|c| input[[h, w, c, b]])
                    .fold(f64::NEG_INFINITY, f64::max);

                let mut sum = 0.0f64;
                for c in 0..dim.c {
                    let e = (input[[h, w, c, b]] - max_val).exp();
                    output[[h, w, c, b]] = e;
                    sum += e;
                }

                if sum > 0.0 {
                    let inv_sum = 1.0 / sum;
                    for c in 0..dim.c {
                        output[[h, w, c, b]] *= inv_sum;
                    }
                }
            }
        }
    }
}

impl Kernel for Activation {
    fn name(&self) -> &'static str {
        self.as_str()
    }

    fn output_dimension(&self, input: Dimension) -> Result<Dimension, TensorError> {
        Ok(input)
    }

    fn execute(&self, input: &Data2D, output: &mut Data2D) -> Result<(), TensorError> {
        activation(*self, input, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: &[f64], b: &[f64], tol: f64) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < tol)
    }

    fn run(kind: Activation, dim: Dimension, values: &[f64]) -> Data2D {
        let input = Data2D::from_vec(dim, values.to_vec()).unwrap();
        let mut output = Data2D::zeros(dim).unwrap();
        kind.execute(&input, &mut output).unwrap();
        output
    }

    #[test]
    fn test_relu() {
        let out = run(Activation::ReLu, Dimension::new(1, 1, 4, 1), &[-2.0, -0.0, 0.5, 3.0]);
        assert_eq!(out.as_slice(), &[0.0, 0.0, 0.5, 3.0]);
    }

    #[test]
    fn test_hard_sigmoid_clips() {
        let out = run(Activation::HardSigmoid, Dimension::new(1, 1, 3, 1), &[-10.0, 0.0, 10.0]);
        assert!(approx_eq(out.as_slice(), &[0.0, 0.5, 1.0], 1e-12));
    }

    #[test]
    fn test_elementwise_values() {
        let x = [-1.0, 0.0, 2.0];
        let dim = Dimension::new(1, 3, 1, 1);
        let e = std::f64::consts::E;

        let elu = run(Activation::ELu, dim, &x);
        assert!(approx_eq(elu.as_slice(), &[1.0 / e - 1.0, 0.0, 2.0], 1e-12));

        let sig = run(Activation::Sigmoid, dim, &x);
        assert!(approx_eq(sig.as_slice(), &[1.0 / (1.0 + e), 0.5, 1.0 / (1.0 + e.powi(-2))], 1e-12));

        let sp = run(Activation::SoftPlus, dim, &x);
        assert!(approx_eq(sp.as_slice(), &[(1.0 + 1.0 / e).ln(), 2f64.ln(), (1.0 + e * e).ln()], 1e-12));

        let ss = run(Activation::SoftSign, dim, &x);
        assert!(approx_eq(ss.as_slice(), &[-0.5, 0.0, 2.0 / 3.0], 1e-12));

        let th = run(Activation::TanH, dim, &x);
        assert!(approx_eq(th.as_slice(), &[(-1f64).tanh(), 0.0, 2f64.tanh()], 1e-12));
    }

    #[test]
    fn test_softplus_large_magnitude() {
        let out = run(Activation::SoftPlus, Dimension::new(1, 1, 2, 1), &[800.0, -800.0]);
        assert_eq!(out.as_slice()[0], 800.0);
        assert!(out.as_slice()[1] >= 0.0 && out.as_slice()[1] < 1e-300);
        assert!(out.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_softmax_over_channels() {
        // Two spatial positions, three channels each.
        let out = run(
            Activation::Softmax,
            Dimension::new(1, 2, 3, 1),
            &[1.0, 2.0, 3.0, 1.0, 1.0, 1.0],
        );
        let r = out.as_slice();
        let sum0: f64 = r[0..3].iter().sum();
        assert!((sum0 - 1.0).abs() < 1e-12);
        assert!(r[0] < r[1] && r[1] < r[2]);
        assert!(approx_eq(&r[3..6], &[1.0 / 3.0; 3], 1e-12));
    }

    #[test]
    fn test_softmax_numerical_stability() {
        let out = run(Activation::Softmax, Dimension::new(1, 1, 3, 1), &[1000.0, 1001.0, 1002.0]);
        let sum: f64 = out.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(out.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_shape_mismatch() {
        let input = Data2D::new(1, 1, 3, 1).unwrap();
        let mut output = Data2D::new(1, 1, 2, 1).unwrap();
        assert!(activation(Activation::ReLu, &input, &mut output).is_err());
    }

}
