// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod grouping;
pub mod ids;
pub mod model;
pub mod natural;
pub mod navigator;
pub mod sequence;
pub mod snapshot;
pub mod state;

pub use grouping::*;
pub use ids::*;
pub use model::*;
pub use natural::*;
pub use navigator::*;
pub use sequence::*;
pub use snapshot::*;
pub use state::*;
