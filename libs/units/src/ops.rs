//! Operator overloads. Multiplication and division panic only when a unit
//! exponent overflows, like integer arithmetic; `Quantity::try_mul` and
//! `Quantity::try_div` report that as an error instead. Conversion through
//! `>>` with a unit string returns a `Result`.

use std::ops::{Div, Mul, Neg, Shr};

use crate::assume::Assumption;
use crate::error::Result;
use crate::quantity::Quantity;

macro_rules! quantity_binop {
    ($trait:ident, $method:ident, $inner:ident) => {
        impl $trait<&Quantity> for &Quantity {
            type Output = Quantity;
            fn $method(self, rhs: &Quantity) -> Quantity {
                expect_exponents(self.$inner(rhs))
            }
        }

        impl $trait<Quantity> for &Quantity {
            type Output = Quantity;
            fn $method(self, rhs: Quantity) -> Quantity {
                expect_exponents(self.$inner(&rhs))
            }
        }

        impl $trait<&Quantity> for Quantity {
            type Output = Quantity;
            fn $method(self, rhs: &Quantity) -> Quantity {
                expect_exponents((&self).$inner(rhs))
            }
        }

        impl $trait<Quantity> for Quantity {
            type Output = Quantity;
            fn $method(self, rhs: Quantity) -> Quantity {
                expect_exponents((&self).$inner(&rhs))
            }
        }

        impl $trait<f64> for &Quantity {
            type Output = Quantity;
            fn $method(self, rhs: f64) -> Quantity {
                expect_exponents(self.$inner(&Quantity::dimensionless(rhs)))
            }
        }

        impl $trait<f64> for Quantity {
            type Output = Quantity;
            fn $method(self, rhs: f64) -> Quantity {
                expect_exponents((&self).$inner(&Quantity::dimensionless(rhs)))
            }
        }

        impl $trait<&Quantity> for f64 {
            type Output = Quantity;
            fn $method(self, rhs: &Quantity) -> Quantity {
                expect_exponents(Quantity::dimensionless(self).$inner(rhs))
            }
        }

        impl $trait<Quantity> for f64 {
            type Output = Quantity;
            fn $method(self, rhs: Quantity) -> Quantity {
                expect_exponents(Quantity::dimensionless(self).$inner(&rhs))
            }
        }
    };
}

fn expect_exponents(result: Result<Quantity>) -> Quantity {
    match result {
        Ok(quantity) => quantity,
        Err(err) => panic!("quantity arithmetic overflowed: {err}"),
    }
}

quantity_binop!(Mul, mul, try_mul);
quantity_binop!(Div, div, try_div);

impl Neg for &Quantity {
    type Output = Quantity;
    fn neg(self) -> Quantity {
        self.negate()
    }
}

impl Neg for Quantity {
    type Output = Quantity;
    fn neg(self) -> Quantity {
        self.negate()
    }
}

/// `quantity >> Assumption::Light` attaches an assumption.
impl Shr<Assumption> for Quantity {
    type Output = Quantity;
    fn shr(self, assumption: Assumption) -> Quantity {
        self.with_assumption(assumption)
    }
}

impl Shr<Assumption> for &Quantity {
    type Output = Quantity;
    fn shr(self, assumption: Assumption) -> Quantity {
        self.clone().with_assumption(assumption)
    }
}

/// `quantity >> "unit"` converts.
impl Shr<&str> for Quantity {
    type Output = Result<Quantity>;
    fn shr(self, target: &str) -> Result<Quantity> {
        self.to(target)
    }
}

impl Shr<&str> for &Quantity {
    type Output = Result<Quantity>;
    fn shr(self, target: &str) -> Result<Quantity> {
        self.to(target)
    }
}
