use crate::f;

/// Extends primitives with more specific formatting options
pub trait ValueExt {
    /// Better scientific number formatting
    ///
    /// The default is not very consistent for scientific in particular, so
    /// this allows easy definition. Works for anything that can be
    /// represented as scientific using the `LowerExp` trait, which is pretty
    /// much every numerical primitive.
    ///
    /// ```rust
    /// # use spinetools_utils::ValueExt;
    /// // e.g. bin contents of an energy spectrum
    /// assert_eq!((1042.7).sci(4, 2), "1.0427e+03".to_string());
    /// assert_eq!((-0.25).sci(2, 2), "-2.50e-01".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: std::fmt::LowerExp> ValueExt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let mut num = f!("{:.precision$e}", &self, precision = precision);
        // `num` is guaranteed to contain 'e', so the unwrap never fires
        let exp = num.split_off(num.find('e').unwrap());
        // make sure the exponent is signed
        let (sign, exp) = match exp.strip_prefix("e-") {
            Some(exp) => ('-', exp),
            None => ('+', &exp[1..]),
        };
        // pad the exponent with zeros if needed and put it back on the number
        num.push_str(&f!("e{}{:0>pad$}", sign, exp, pad = exp_pad));
        num
    }
}
