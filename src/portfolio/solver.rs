//! # Simplex Solver
//!
//! $$
//! \min_{\mathbf{x}} f(T(\mathbf{x})), \qquad
//! T:\mathbb{R}^n \to \{\mathbf{w} : \textstyle\sum_i w_i = 1,\ 0 \le w_i \le u\}
//! $$
//!
//! One reusable constrained-minimization abstraction shared by every
//! optimizer entry point. The unconstrained Nelder-Mead iterate is mapped
//! onto the feasible set by a softmax reparameterization (sum-to-one,
//! long-only) followed by an exact cap-and-redistribute projection for
//! per-asset upper bounds, so returned weights satisfy the constraints to
//! machine precision rather than up to a penalty residual.

use argmin::core::CostFunction;
use argmin::core::Executor;
use argmin::core::TerminationReason;
use argmin::core::TerminationStatus;
use argmin::solver::neldermead::NelderMead;
use tracing::debug;

use super::types::SolverOptions;
use crate::error::QuantError;
use crate::error::Result;

/// Map of an unconstrained parameter vector onto the feasible weight set.
#[derive(Clone, Copy, Debug)]
pub(crate) struct WeightTransform {
  /// Per-asset upper bound; `None` means the plain [0, 1] simplex.
  pub cap: Option<f64>,
}

impl WeightTransform {
  pub(crate) fn to_weights(&self, x: &[f64]) -> Vec<f64> {
    let mut w = softmax(x);
    if let Some(cap) = self.cap {
      clip_to_cap(&mut w, cap);
    }
    w
  }
}

fn softmax(x: &[f64]) -> Vec<f64> {
  if x.is_empty() {
    return Vec::new();
  }

  let max_x = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
  let exps: Vec<f64> = x.iter().map(|&v| (v - max_x).exp()).collect();
  let sum: f64 = exps.iter().sum();

  if sum < 1e-15 {
    vec![1.0 / x.len() as f64; x.len()]
  } else {
    exps.iter().map(|&e| e / sum).collect()
  }
}

/// Redistribute weight above `cap` onto uncapped entries, preserving the
/// sum. Terminates because every pass pins at least one new entry at the
/// cap. Requires `n * cap >= 1`, which callers check eagerly.
fn clip_to_cap(w: &mut [f64], cap: f64) {
  loop {
    let mut excess = 0.0;
    let mut headroom = 0.0;

    for wi in w.iter_mut() {
      if *wi > cap {
        excess += *wi - cap;
        *wi = cap;
      }
    }
    for wi in w.iter() {
      if *wi < cap {
        headroom += *wi;
      }
    }

    if excess <= 1e-15 {
      return;
    }
    if headroom <= 1e-15 {
      // Everything pinned; spread uniformly below the cap.
      let free: Vec<usize> = (0..w.len()).filter(|&i| w[i] < cap).collect();
      let share = excess / free.len().max(1) as f64;
      for i in free {
        w[i] += share;
      }
      return;
    }

    let scale = excess / headroom;
    for wi in w.iter_mut() {
      if *wi < cap {
        *wi += *wi * scale;
      }
    }
  }
}

struct SimplexProblem<F: Fn(&[f64]) -> f64> {
  objective: F,
  transform: WeightTransform,
}

impl<F: Fn(&[f64]) -> f64> CostFunction for SimplexProblem<F> {
  type Param = Vec<f64>;
  type Output = f64;

  fn cost(&self, x: &Self::Param) -> std::result::Result<Self::Output, argmin::core::Error> {
    let w = self.transform.to_weights(x);
    Ok((self.objective)(&w))
  }
}

/// Deterministic initial simplex around the uniform portfolio.
fn initial_simplex(n: usize) -> Vec<Vec<f64>> {
  let x0 = vec![0.0; n];
  let mut simplex = Vec::with_capacity(n + 1);
  simplex.push(x0.clone());
  for i in 0..n {
    let mut point = x0.clone();
    point[i] = 1.0;
    simplex.push(point);
  }
  simplex
}

/// Minimize `objective` over the capped weight simplex.
///
/// The objective receives feasible weights only. Iteration-budget exhaustion
/// surfaces as [`QuantError::DidNotConverge`] carrying the best iterate.
pub(crate) fn solve_on_simplex<F>(
  objective: F,
  n: usize,
  cap: Option<f64>,
  opts: &SolverOptions,
) -> Result<Vec<f64>>
where
  F: Fn(&[f64]) -> f64,
{
  if n == 0 {
    return Err(QuantError::InvalidInput(
      "cannot optimize an empty asset universe".into(),
    ));
  }

  let transform = WeightTransform { cap };

  if n == 1 {
    // Single asset: the equality constraint fixes the answer.
    return Ok(transform.to_weights(&[0.0]));
  }

  let problem = SimplexProblem {
    objective,
    transform,
  };

  let solver = NelderMead::new(initial_simplex(n))
    .with_sd_tolerance(opts.sd_tolerance)
    .map_err(|e| QuantError::InvalidInput(e.to_string()))?;

  debug!(
    n_assets = n,
    max_iters = opts.max_iters,
    cap = ?cap,
    "running Nelder-Mead on weight simplex"
  );

  let res = Executor::new(problem, solver)
    .configure(|state| state.max_iters(opts.max_iters))
    .run()
    .map_err(|e| QuantError::DidNotConverge {
      weights: transform.to_weights(&vec![0.0; n]),
      message: e.to_string(),
    })?;

  let best_x = res
    .state
    .best_param
    .clone()
    .unwrap_or_else(|| vec![0.0; n]);
  let weights = transform.to_weights(&best_x);

  match &res.state.termination_status {
    TerminationStatus::Terminated(TerminationReason::MaxItersReached) => {
      Err(QuantError::DidNotConverge {
        weights,
        message: format!("iteration budget of {} exhausted", opts.max_iters),
      })
    }
    TerminationStatus::NotTerminated => Err(QuantError::DidNotConverge {
      weights,
      message: "solver stopped without a termination reason".into(),
    }),
    TerminationStatus::Terminated(reason) => {
      debug!(?reason, "solver terminated");
      Ok(weights)
    }
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::*;

  #[test]
  fn softmax_of_zeros_is_uniform() {
    let w = softmax(&[0.0, 0.0, 0.0, 0.0]);
    for wi in w {
      assert_abs_diff_eq!(wi, 0.25, epsilon = 1e-12);
    }
  }

  #[test]
  fn clip_preserves_sum_and_respects_cap() {
    let mut w = vec![0.7, 0.2, 0.05, 0.05];
    clip_to_cap(&mut w, 0.3);

    let sum: f64 = w.iter().sum();
    assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-12);
    for wi in &w {
      assert!(*wi <= 0.3 + 1e-12, "weight {wi} exceeds cap");
    }
  }

  #[test]
  fn clip_handles_exactly_saturated_cap() {
    let mut w = vec![0.9, 0.05, 0.05];
    clip_to_cap(&mut w, 1.0 / 3.0);

    let sum: f64 = w.iter().sum();
    assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-9);
    for wi in &w {
      assert!(*wi <= 1.0 / 3.0 + 1e-9);
    }
  }

  #[test]
  fn solver_finds_vertex_for_linear_objective() {
    // Minimizing -w[2] over the simplex pushes all weight to asset 2.
    let w = solve_on_simplex(|w| -w[2], 3, None, &SolverOptions::default()).unwrap();
    assert!(w[2] > 0.95, "expected concentration, got {w:?}");
  }

  #[test]
  fn tiny_iteration_budget_reports_divergence_with_iterate() {
    let opts = SolverOptions {
      max_iters: 2,
      ..SolverOptions::default()
    };
    let res = solve_on_simplex(|w| -w[0], 4, None, &opts);
    match res {
      Err(QuantError::DidNotConverge { weights, .. }) => {
        assert_eq!(weights.len(), 4);
      }
      other => panic!("expected DidNotConverge, got {other:?}"),
    }
  }
}
