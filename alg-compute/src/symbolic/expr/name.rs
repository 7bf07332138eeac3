use alg_error::Error;
use crate::error::InvalidName;

/// Letters that name constants, and so cannot be used as variables.
const RESERVED: [char; 2] = ['e', 'i'];

/// Checks that the given name is usable as a variable, returning the single letter it consists
/// of.
///
/// A variable name must be exactly one ASCII letter, other than the reserved letters `e` and `i`.
/// Upper-case `E` and `I` are ordinary variables.
pub fn validate_name(name: &str) -> Result<char, Error> {
    let invalid = |reason: String| Error::spanless(InvalidName {
        name: name.to_string(),
        reason,
    });

    let mut chars = name.chars();
    let letter = match (chars.next(), chars.next()) {
        (Some(letter), None) => letter,
        _ => return Err(invalid("variable names must be a single letter".to_string())),
    };

    if !letter.is_ascii_alphabetic() {
        return Err(invalid(
            "a variable name must be a letter, not a symbol nor a numeric character".to_string(),
        ));
    }

    if RESERVED.contains(&letter) {
        return Err(invalid(format!(
            "a variable cannot be named '{}', for it is a reserved letter",
            letter,
        )));
    }

    Ok(letter)
}

#[cfg(test)]
mod tests {
    use alg_error::Category;
    use pretty_assertions::assert_eq;
    use super::*;

    fn reason(name: &str) -> String {
        let err = validate_name(name).unwrap_err();
        assert_eq!(err.category(), Category::InvalidName);
        err.kind_ref::<InvalidName>().unwrap().reason.clone()
    }

    #[test]
    fn single_letters() {
        assert_eq!(validate_name("x").unwrap(), 'x');
        assert_eq!(validate_name("E").unwrap(), 'E');
        assert_eq!(validate_name("I").unwrap(), 'I');
    }

    #[test]
    fn rejected_names() {
        assert_eq!(reason("xy"), "variable names must be a single letter");
        assert_eq!(reason(""), "variable names must be a single letter");
        assert_eq!(reason("1"), "a variable name must be a letter, not a symbol nor a numeric character");
        assert_eq!(reason("$"), "a variable name must be a letter, not a symbol nor a numeric character");
        assert_eq!(reason("i"), "a variable cannot be named 'i', for it is a reserved letter");
        assert_eq!(reason("e"), "a variable cannot be named 'e', for it is a reserved letter");
    }
}
