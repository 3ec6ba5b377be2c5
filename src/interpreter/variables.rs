use std::fmt;

use thiserror::Error;

/// Number of variables, one per letter `A..=Z`.
pub const VARIABLE_COUNT: usize = 26;

/// A variable name, one of the letters `A..=Z`.
///
/// The only way to build one is [`TryFrom<char>`], which accepts a letter in
/// either case and rejects everything else, so a `Variable` is always a valid
/// index into a [`VariableStore`].
///
/// # Example
/// ```
/// use lazycalc::interpreter::variables::Variable;
///
/// let v = Variable::try_from('c').unwrap();
/// assert_eq!(v.letter(), 'C');
/// assert_eq!(v.index(), 2);
/// assert!(Variable::try_from('7').is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(u8);

/// The character passed to [`Variable::try_from`] is not an ASCII letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("'{0}' is not a variable name")]
pub struct NotAVariable(pub char);

impl TryFrom<char> for Variable {
    type Error = NotAVariable;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c.is_ascii_alphabetic() {
            Ok(Self(c.to_ascii_uppercase() as u8 - b'A'))
        } else {
            Err(NotAVariable(c))
        }
    }
}

impl Variable {
    /// Iterates over all variables from `A` to `Z`.
    pub fn all() -> impl Iterator<Item = Self> {
        (b'A'..=b'Z').map(|letter| Self(letter - b'A'))
    }

    /// The upper case letter naming the variable.
    #[must_use]
    pub const fn letter(self) -> char {
        (b'A' + self.0) as char
    }

    /// Position of the variable in the store, `0` for `A`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Values of the 26 variables.
///
/// A slot is `None` until an expression assigning that variable is
/// committed. Only the scheduler writes to the store; parsing and folding
/// only read it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableStore {
    slots: [Option<f64>; VARIABLE_COUNT],
}

impl VariableStore {
    /// Creates a store with every variable undefined.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `var` if it has been defined.
    #[must_use]
    pub const fn get(&self, var: Variable) -> Option<f64> {
        self.slots[var.index()]
    }

    /// Returns whether `var` has been defined.
    #[must_use]
    pub const fn is_defined(&self, var: Variable) -> bool {
        self.slots[var.index()].is_some()
    }

    /// Defines `var`, replacing any earlier value.
    pub const fn set(&mut self, var: Variable, value: f64) {
        self.slots[var.index()] = Some(value);
    }

    /// Iterates over the defined variables in alphabetical order.
    pub fn defined(&self) -> impl Iterator<Item = (Variable, f64)> + '_ {
        Variable::all().filter_map(|var| self.get(var).map(|value| (var, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_are_case_insensitive() {
        let lower = Variable::try_from('q').unwrap();
        let upper = Variable::try_from('Q').unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.to_string(), "Q");
    }

    #[test]
    fn non_letters_are_rejected() {
        for c in ['0', '_', ' ', '=', 'é', '['] {
            assert_eq!(Variable::try_from(c), Err(NotAVariable(c)));
        }
        assert_eq!(NotAVariable('7').to_string(), "'7' is not a variable name");
    }

    #[test]
    fn all_covers_the_alphabet() {
        let letters: String = Variable::all().map(Variable::letter).collect();
        assert_eq!(letters, "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    }

    #[test]
    fn store_starts_undefined_and_overwrites() {
        let mut store = VariableStore::new();
        let a = Variable::try_from('a').unwrap();
        let z = Variable::try_from('z').unwrap();

        assert!(!store.is_defined(a));
        assert_eq!(store.get(z), None);

        store.set(z, 1.5);
        store.set(a, 2.0);
        store.set(a, -3.0);

        assert_eq!(store.get(a), Some(-3.0));
        assert_eq!(store.defined().collect::<Vec<_>>(), vec![(a, -3.0), (z, 1.5)]);
    }
}
