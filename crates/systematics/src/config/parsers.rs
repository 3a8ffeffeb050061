// nom parser combinators
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{digit1, space0, space1};
use nom::combinator::{map, map_res, opt};
use nom::multi::many1;
use nom::number::complete::double;
use nom::sequence::preceded;
use nom::IResult;

/// Section headers opening a configuration block
#[derive(Debug, PartialEq)]
pub(crate) enum Header {
    Settings,
    Multisim(String),
    Multisigma(String),
    Variation(String),
}

/// The two ways a binning can be written
#[derive(Debug, PartialEq)]
pub(crate) enum BinSpec {
    Uniform { n_bins: usize, lower: f64, upper: f64 },
    Edges(Vec<f64>),
}

/// Checks if the line closes a section
pub(crate) fn is_end(i: &str) -> bool {
    i.trim() == "end"
}

/// Parse a section-opening line into a Header
pub(crate) fn section_header(i: &str) -> IResult<&str, Header> {
    alt((
        map(preceded(tag("multisim"), named), Header::Multisim),
        map(preceded(tag("multisigma"), named), Header::Multisigma),
        map(preceded(tag("variation"), named), Header::Variation),
        map(tag("settings"), |_| Header::Settings),
    ))(i.trim_start())
}

/// Parse the name following a section keyword
fn named(i: &str) -> IResult<&str, String> {
    map(preceded(space1, identifier), str::to_string)(i)
}

/// Section and source names: alphanumerics plus `_` and `-`
pub(crate) fn identifier(i: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-')(i)
}

/// Split a key line into its leading keyword and the remainder
pub(crate) fn keyword(i: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphabetic() || c == '_')(i.trim_start())
}

/// A whitespace-separated list of floats
pub(crate) fn double_list(i: &str) -> IResult<&str, Vec<f64>> {
    many1(preceded(space0, double))(i)
}

/// A single float value
pub(crate) fn double_value(i: &str) -> IResult<&str, f64> {
    preceded(space0, double)(i)
}

/// An unsigned integer value
pub(crate) fn uint(i: &str) -> IResult<&str, usize> {
    map_res(preceded(space0, digit1), str::parse)(i)
}

/// A path token with an optional trailing exposure
///
/// Paths are anything up to whitespace, so spaces in file names are not
/// supported by the format.
pub(crate) fn path_value(i: &str) -> IResult<&str, (&str, Option<f64>)> {
    let (i, path) = preceded(space0, take_while1(|c: char| !c.is_whitespace()))(i)?;
    let (i, exposure) = opt(double_value)(i)?;
    Ok((i, (path, exposure)))
}

/// A binning specification, either uniform or explicit edges
pub(crate) fn bin_spec(i: &str) -> IResult<&str, BinSpec> {
    alt((uniform_bins, edge_bins))(i.trim_start())
}

fn uniform_bins(i: &str) -> IResult<&str, BinSpec> {
    let (i, _) = tag("uniform")(i)?;
    let (i, n_bins) = uint(i)?;
    let (i, lower) = double_value(i)?;
    let (i, upper) = double_value(i)?;
    Ok((i, BinSpec::Uniform { n_bins, lower, upper }))
}

fn edge_bins(i: &str) -> IResult<&str, BinSpec> {
    let (i, _) = tag("edges")(i)?;
    let (i, edges) = double_list(i)?;
    Ok((i, BinSpec::Edges(edges)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_parse_with_names() {
        assert_eq!(section_header("settings").unwrap().1, Header::Settings);
        assert_eq!(
            section_header("multisim flux_all").unwrap().1,
            Header::Multisim("flux_all".to_string())
        );
        assert_eq!(
            section_header("  variation tpc-gain").unwrap().1,
            Header::Variation("tpc-gain".to_string())
        );
        assert!(section_header("multisim").is_err());
    }

    #[test]
    fn bin_specs_parse_both_forms() {
        assert_eq!(
            bin_spec("uniform 25 0.0 3000.0").unwrap().1,
            BinSpec::Uniform {
                n_bins: 25,
                lower: 0.0,
                upper: 3000.0
            }
        );
        assert_eq!(
            bin_spec("edges 0.0 500.0 3000.0").unwrap().1,
            BinSpec::Edges(vec![0.0, 500.0, 3000.0])
        );
    }

    #[test]
    fn paths_take_an_optional_exposure() {
        let (_, (path, exposure)) = path_value(" out/mc/selectedNu.jsonl 2.5e20").unwrap();
        assert_eq!(path, "out/mc/selectedNu.jsonl");
        assert_eq!(exposure, Some(2.5e20));

        let (_, (path, exposure)) = path_value(" out/mc/selectedNu.jsonl").unwrap();
        assert_eq!(path, "out/mc/selectedNu.jsonl");
        assert_eq!(exposure, None);
    }
}
