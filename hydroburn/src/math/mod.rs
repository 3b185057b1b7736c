mod linspace;
mod supercover;

pub(crate) use {linspace::linspace, supercover::Supercover};
