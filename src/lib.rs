pub mod quoridor;
pub mod qtp_server;

pub mod utils {
    pub mod prelude {
        pub use anyhow::{anyhow, bail, Context, Error};
        pub type Result<T> = anyhow::Result<T, Error>;

        pub use std::{
            collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
            ops::{Add, Sub}
        };
    }
}

pub mod prelude {
    pub use super::quoridor::prelude::*;
    pub use super::qtp_server::*;
    pub use super::utils::prelude::*;
}
