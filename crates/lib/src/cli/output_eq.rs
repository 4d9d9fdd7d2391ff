/// Compare an answer against the literal given as `expect`.
///
/// Integer literals in `expect` infer their type from the answer through the
/// single matching impl, so `expect = (296, 303)` checks a `(u32, u32)`.
pub trait OutputEq<O = Self> {
    fn output_eq(&self, other: &O) -> bool;
}

impl<A, B, C, D> OutputEq<(C, D)> for (A, B)
where
    A: OutputEq<C>,
    B: OutputEq<D>,
{
    #[inline]
    fn output_eq(&self, (c, d): &(C, D)) -> bool {
        let (a, b) = self;
        a.output_eq(c) && b.output_eq(d)
    }
}

macro_rules! eq {
    ($($ty:ty),* $(,)?) => {
        $(
            impl OutputEq for $ty {
                #[inline]
                fn output_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

eq!(u32, u64);
