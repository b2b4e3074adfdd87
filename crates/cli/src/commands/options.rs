//! Parsing of `--option` flags.

use std::str::FromStr;

use quickbite_cart::SelectedOption;
use quickbite_core::{ChoiceId, Money, OptionId};
use thiserror::Error;

/// A selected option given on the command line as
/// `optionId:choiceId:surcharge` (surcharge in đồng, may be 0).
#[derive(Debug, Clone)]
pub struct OptionSpec {
    pub option_id: String,
    pub choice_id: String,
    pub surcharge: i64,
}

/// Errors from parsing an option spec.
#[derive(Debug, Error)]
pub enum OptionSpecError {
    #[error("expected optionId:choiceId:surcharge, got `{0}`")]
    Shape(String),
    #[error("surcharge is not a number in `{0}`")]
    Surcharge(String),
}

impl FromStr for OptionSpec {
    type Err = OptionSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(option_id), Some(choice_id), Some(surcharge)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(OptionSpecError::Shape(s.to_owned()));
        };
        if option_id.is_empty() || choice_id.is_empty() {
            return Err(OptionSpecError::Shape(s.to_owned()));
        }
        let surcharge = surcharge
            .parse()
            .map_err(|_| OptionSpecError::Surcharge(s.to_owned()))?;
        Ok(Self {
            option_id: option_id.to_owned(),
            choice_id: choice_id.to_owned(),
            surcharge,
        })
    }
}

impl From<OptionSpec> for SelectedOption {
    fn from(spec: OptionSpec) -> Self {
        Self {
            option_id: OptionId::new(spec.option_id),
            choice_id: ChoiceId::new(spec.choice_id),
            additional_price: Money::vnd(spec.surcharge),
        }
    }
}

/// Convert the parsed flags into the cart's option list.
pub fn to_selected(options: Vec<OptionSpec>) -> Vec<SelectedOption> {
    options.into_iter().map(Into::into).collect()
}
