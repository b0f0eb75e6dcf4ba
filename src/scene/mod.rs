pub(crate) mod director;
pub(crate) mod metrics;
pub(crate) mod mobject;
pub(crate) mod path_ops;
pub(crate) mod shapes;
pub(crate) mod state;
