//! Every standard reactor kind, plus the argument parsing their
//! transitions share.

mod aligning;
mod drawing;
mod general_html;
mod html_waiter;
mod radial_editor;
mod summary;
mod tabula_rasa;

pub use aligning::AligningReactor;
pub use drawing::Drawing;
pub use general_html::GeneralHtmlReactor;
pub use html_waiter::HtmlWaiterReactor;
pub use radial_editor::RadialEditorReactor;
pub use summary::{SummaryReactor, COMPLETION_MARKER, HISTORY_OBSERVER};
pub use tabula_rasa::{Phase, TabulaRasaReactor};

use starlab_core::Star;

use crate::error::{AutomatonError, AutomatonResult};
use crate::StateMachineBuilder;

/// Register every standard reactor kind and its transitions.
pub fn install_standard_reactors(builder: &mut StateMachineBuilder) {
    tabula_rasa::install(builder);
    radial_editor::install(builder);
    aligning::install(builder);
    html_waiter::install(builder);
    general_html::install(builder);
    summary::install(builder);
}

fn invalid(name: &str, args: &str, message: impl Into<String>) -> AutomatonError {
    AutomatonError::InvalidTransitionArgs {
        name: name.to_string(),
        args: args.to_string(),
        message: message.into(),
    }
}

/// A screen name: the whole argument string, trimmed.
pub(crate) fn parse_target(name: &str, args: &str) -> AutomatonResult<String> {
    let target = args.trim();
    if target.is_empty() {
        return Err(invalid(name, args, "missing target screen"));
    }
    Ok(target.to_string())
}

/// `STAR TARGET`, e.g. `{ 5 / 2 } Pentagram`.
pub(crate) fn parse_star_target(name: &str, args: &str) -> AutomatonResult<(Star, String)> {
    let (star, rest) = Star::parse_prefix(args).map_err(|e| invalid(name, args, e.to_string()))?;
    let target = parse_target(name, rest)?;
    Ok((star, target))
}

/// `LINK TARGET`: one word, then the rest of the line.
pub(crate) fn parse_link_target(name: &str, args: &str) -> AutomatonResult<(String, String)> {
    let Some((link, rest)) = args.trim().split_once(char::is_whitespace) else {
        return Err(invalid(name, args, "expected LINK TARGET"));
    };
    Ok((link.to_string(), parse_target(name, rest)?))
}
