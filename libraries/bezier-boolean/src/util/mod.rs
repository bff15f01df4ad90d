pub(crate) mod aabb;
pub(crate) mod hull;
pub(crate) mod line;
pub(crate) mod math;
pub(crate) mod quadrature;
pub(crate) mod range;
pub(crate) mod roots;
