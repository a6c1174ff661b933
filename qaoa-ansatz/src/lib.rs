//! QAOA ansatz construction
//!
//! Encoders turn a classical optimization problem into the two
//! parameterized operator sequences of a QAOA layer, the phase operator
//! `U(γ)` and the mixer `U(β)`, and score candidate bitstrings classically:
//!
//! - [`MaxCut`]: weighted maximum cut of a [`Graph`]
//! - [`ExactCover`]: select subsets covering every element exactly once
//! - [`Qubo`]: minimize `xᵀQx + cᵀx + b`
//! - [`Portfolio`]: budget-constrained mean-variance selection, via [`Qubo`]
//!
//! All encoders implement [`Ansatz`] and use the X mixer from [`mixer`].
//! Circuits are built with [`qaoa_core`] and carry symbolic angles; binding
//! values to `γ` and `β` and running the circuit is left to the caller.
//!
//! # Example
//! ```
//! use qaoa_ansatz::{Ansatz, AnsatzConfig, Graph, MaxCut};
//!
//! let graph = Graph::from_edges(3, &[(0, 1, 1.0), (1, 2, 1.0)]).unwrap();
//! let maxcut = MaxCut::new(graph, AnsatzConfig::with_barriers()).unwrap();
//!
//! let phase = maxcut.create_phase().unwrap();
//! let mixer = maxcut.create_mixer().unwrap();
//! assert_eq!(phase.num_blocks(), 2);
//! assert_eq!(mixer.len(), 4);
//! assert_eq!(maxcut.cost("010").unwrap(), 2.0);
//! ```

pub mod ansatz;
pub mod bitstring;
pub mod config;
pub mod error;
pub mod exact_cover;
pub mod graph;
pub mod ising;
pub mod max_cut;
pub mod mixer;
mod params;
pub mod portfolio;
pub mod problem;
pub mod qubo;
pub mod utils;

pub use ansatz::Ansatz;
pub use bitstring::Bitstring;
pub use config::{AnsatzConfig, COEFFICIENT_TOLERANCE};
pub use error::{AnsatzError, Result};
pub use exact_cover::ExactCover;
pub use graph::Graph;
pub use ising::{IsingModel, PhaseStats};
pub use max_cut::MaxCut;
pub use portfolio::{Portfolio, PortfolioParams};
pub use problem::ProblemKind;
pub use qubo::Qubo;
pub use utils::{brute_force_best, qaoa_layer, random_initial_parameters};
