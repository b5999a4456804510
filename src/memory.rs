use num::{Float, NumCast, Zero};
use std::{
    fmt::{Debug, Display},
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

pub trait Primitive: Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + 'static {}
impl Primitive for f32 {}
impl Primitive for f64 {}
