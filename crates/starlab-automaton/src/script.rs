//! Screen script parsing.
//!
//! A screen script is line oriented:
//!
//! ```text
//! # comment
//! Html html/pentagram.html
//! Reactor TabulaRasaReactor {5/2}
//! Transition Star { 5 / 2 } Pentagram Found
//! ```
//!
//! The parser only splits declarations. Resolving kind names against the
//! registered constructors happens in the state machine's catalog.

use tracing::trace;

use crate::error::{AutomatonError, AutomatonResult};

/// `Html RESOURCE` keyword.
pub const KEYWORD_HTML: &str = "Html";
/// `Reactor KIND ARGS` keyword.
pub const KEYWORD_REACTOR: &str = "Reactor";
/// `Transition NAME ARGS` keyword.
pub const KEYWORD_TRANSITION: &str = "Transition";

/// Reactor declaration of a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactorDecl {
    /// Registered reactor kind name.
    pub kind: String,
    /// Free-form argument string, passed verbatim to the constructor.
    pub args: String,
    /// 1-based source line.
    pub line: usize,
}

/// Transition declaration of a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionDecl {
    /// Transition kind name, registered for the screen's reactor kind.
    pub name: String,
    /// Argument string for the transition constructor.
    pub args: String,
    /// 1-based source line.
    pub line: usize,
}

/// A parsed screen description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenScript {
    /// Screen name.
    pub screen: String,
    /// Resource shown in the side panel, if any.
    pub html: Option<String>,
    /// The reactor to construct.
    pub reactor: ReactorDecl,
    /// Transitions, in declaration order.
    pub transitions: Vec<TransitionDecl>,
}

/// Split a line into its keyword and the trimmed remainder.
fn split_keyword(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    }
}

/// Parse an (already expanded) screen script.
pub fn parse_screen(screen: &str, text: &str) -> AutomatonResult<ScreenScript> {
    let malformed = |line: usize, message: String| AutomatonError::MalformedDeclaration {
        screen: screen.to_string(),
        line,
        message,
    };

    let mut html: Option<String> = None;
    let mut reactor: Option<ReactorDecl> = None;
    let mut transitions = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (keyword, rest) = split_keyword(line);
        trace!(screen, line = line_no, keyword, "script_declaration");

        match keyword {
            KEYWORD_HTML => {
                if rest.is_empty() {
                    return Err(malformed(line_no, "Html needs a resource name".into()));
                }
                if html.is_some() {
                    return Err(malformed(line_no, "Html declared twice".into()));
                }
                html = Some(rest.to_string());
            }
            KEYWORD_REACTOR => {
                if reactor.is_some() {
                    return Err(malformed(line_no, "Reactor declared twice".into()));
                }
                let (kind, args) = split_keyword(rest);
                if kind.is_empty() {
                    return Err(malformed(line_no, "Reactor needs a kind".into()));
                }
                reactor = Some(ReactorDecl {
                    kind: kind.to_string(),
                    args: args.to_string(),
                    line: line_no,
                });
            }
            KEYWORD_TRANSITION => {
                if reactor.is_none() {
                    return Err(malformed(
                        line_no,
                        "Transition declared before Reactor".into(),
                    ));
                }
                let (name, args) = split_keyword(rest);
                if name.is_empty() {
                    return Err(malformed(line_no, "Transition needs a name".into()));
                }
                transitions.push(TransitionDecl {
                    name: name.to_string(),
                    args: args.to_string(),
                    line: line_no,
                });
            }
            other => {
                return Err(malformed(line_no, format!("unknown keyword {other:?}")));
            }
        }
    }

    let reactor = reactor.ok_or_else(|| malformed(0, "no Reactor declared".into()))?;

    Ok(ScreenScript {
        screen: screen.to_string(),
        html,
        reactor,
        transitions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_screen() {
        let text = "\
# The pentagram screen
Html html/pentagram.html

Reactor   TabulaRasaReactor {5/2} {5/1}
Transition Star { 5 / 2 } Pentagram Found
Transition Star {5/1} Pentagon
";
        let script = parse_screen("Draw", text).unwrap();
        assert_eq!(script.screen, "Draw");
        assert_eq!(script.html.as_deref(), Some("html/pentagram.html"));
        assert_eq!(script.reactor.kind, "TabulaRasaReactor");
        assert_eq!(script.reactor.args, "{5/2} {5/1}");
        assert_eq!(script.reactor.line, 4);
        assert_eq!(script.transitions.len(), 2);
        assert_eq!(script.transitions[0].name, "Star");
        assert_eq!(script.transitions[0].args, "{ 5 / 2 } Pentagram Found");
        assert_eq!(script.transitions[1].line, 6);
    }

    #[test]
    fn test_reactor_without_args() {
        let script = parse_screen("Wait", "Reactor HTMLWaiterReactor\nTransition Done Next").unwrap();
        assert_eq!(script.reactor.args, "");
        assert_eq!(script.transitions[0].args, "Next");
        assert!(script.html.is_none());
    }

    #[test]
    fn test_missing_reactor() {
        let err = parse_screen("Empty", "# nothing\n").unwrap_err();
        assert!(matches!(err, AutomatonError::MalformedDeclaration { line: 0, .. }));
    }

    #[test]
    fn test_transition_before_reactor() {
        let err = parse_screen("S", "Transition Done X\nReactor HTMLWaiterReactor").unwrap_err();
        assert!(matches!(err, AutomatonError::MalformedDeclaration { line: 1, .. }));
    }

    #[test]
    fn test_unknown_keyword() {
        let err = parse_screen("S", "Reactor A\nGoto B").unwrap_err();
        match err {
            AutomatonError::MalformedDeclaration {
                screen,
                line,
                message,
            } => {
                assert_eq!(screen, "S");
                assert_eq!(line, 2);
                assert!(message.contains("Goto"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_reactor() {
        assert!(parse_screen("S", "Reactor A\nReactor B").is_err());
    }
}
