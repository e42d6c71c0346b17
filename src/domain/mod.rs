// Domain layer: course/row/totals models, the grade scale, and ports.

pub mod grade;
pub mod model;
pub mod ports;
