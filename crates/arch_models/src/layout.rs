//! Parameter layouts.
//!
//! A layout names every position of a parameter vector so that callers can
//! build and inspect vectors without hard-coding offsets.
//!
//! | Variant | Layout |
//! |---------|--------|
//! | Constant | `sigma2` |
//! | ARCH(p) | `omega, alpha[1..p]` |
//! | GARCH / EGARCH (p, o, q) | `omega, alpha[1..p], gamma[1..o], beta[1..q]` |
//! | HARCH(lags) | `omega, alpha[lag_1], …` |
//! | EWMA | `lam` |

use crate::spec::ModelSpec;

/// Ordered parameter names for one model specification.
///
/// # Examples
///
/// ```
/// use arch_models::spec::ModelSpec;
///
/// let layout = ModelSpec::gjr(1, 1, 1).layout();
/// assert_eq!(layout.names(), ["omega", "alpha[1]", "gamma[1]", "beta[1]"]);
/// assert_eq!(layout.position("beta[1]"), Some(3));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterLayout {
    names: Vec<String>,
}

impl ParameterLayout {
    /// Builds the layout for a specification.
    pub fn for_spec(spec: &ModelSpec) -> Self {
        let mut names = Vec::with_capacity(spec.num_params());
        match spec {
            ModelSpec::Constant => names.push("sigma2".to_string()),
            ModelSpec::Arch { p } => {
                names.push("omega".to_string());
                push_indexed(&mut names, "alpha", *p);
            }
            ModelSpec::Garch { p, o, q, .. } | ModelSpec::Egarch { p, o, q } => {
                names.push("omega".to_string());
                push_indexed(&mut names, "alpha", *p);
                push_indexed(&mut names, "gamma", *o);
                push_indexed(&mut names, "beta", *q);
            }
            ModelSpec::Harch { lags } => {
                names.push("omega".to_string());
                names.extend(lags.iter().map(|lag| format!("alpha[{}]", lag)));
            }
            ModelSpec::Ewma => names.push("lam".to_string()),
        }
        Self { names }
    }

    /// Number of parameters.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` for a layout without parameters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Parameter names in vector order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of a named parameter.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

fn push_indexed(names: &mut Vec<String>, prefix: &str, count: usize) {
    names.extend((1..=count).map(|i| format!("{}[{}]", prefix, i)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_lengths_match_num_params() {
        let specs = [
            ModelSpec::Constant,
            ModelSpec::Arch { p: 2 },
            ModelSpec::garch(2, 3),
            ModelSpec::gjr(1, 1, 1),
            ModelSpec::egarch(1, 2, 1),
            ModelSpec::Harch {
                lags: vec![1, 5, 22],
            },
            ModelSpec::Ewma,
        ];
        for spec in specs.iter() {
            assert_eq!(spec.layout().len(), spec.num_params(), "{:?}", spec);
        }
    }

    #[test]
    fn test_garch_layout_order() {
        let layout = ModelSpec::garch(2, 1).layout();
        assert_eq!(layout.names(), ["omega", "alpha[1]", "alpha[2]", "beta[1]"]);
    }

    #[test]
    fn test_harch_layout_names_windows() {
        let layout = ModelSpec::Harch { lags: vec![1, 5] }.layout();
        assert_eq!(layout.names(), ["omega", "alpha[1]", "alpha[5]"]);
        assert_eq!(layout.position("alpha[5]"), Some(2));
        assert_eq!(layout.position("beta[1]"), None);
    }

    #[test]
    fn test_single_parameter_layouts() {
        assert_eq!(ModelSpec::Constant.layout().names(), ["sigma2"]);
        assert_eq!(ModelSpec::Ewma.layout().names(), ["lam"]);
        assert!(!ModelSpec::Ewma.layout().is_empty());
    }
}
