pub(crate) mod form;
pub(crate) mod result;
pub(crate) mod submit;
