// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;
use velo_booking::{FlowError, Rejected};
use velo_core::VeloError;

/// Anything a subcommand can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] VeloError),

    /// The booking flow refused a step.
    #[error(transparent)]
    Rejected(#[from] Rejected),

    /// A backend call made by the booking flow failed.
    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error("{0}")]
    Usage(String),

    #[error("failed to render output: {0}")]
    Output(String),
}
