//! Standard library
//!
//! Native implementations of the Refal-5 built-in functions ordinary
//! programs rely on. Each one receives the evaluator and its argument; an
//! argument of the wrong shape is treated exactly like a user function with
//! no matching sentence.
//!
//! | Function | Argument | Result |
//! |----------|----------|--------|
//! | `Prout` | `e.X` | empty; prints `e.X` |
//! | `Print` | `e.X` | `e.X`; prints `e.X` |
//! | `Card` | empty | next input line, or `0` at end of input |
//! | `Add` `Sub` `Mul` `Div` `Mod` | `s.N s.M` or `(e.N) e.M` | number |
//! | `Compare` | as above | `'-'`, `'0'` or `'+'` |
//! | `Numb` | `e.Chars` | number |
//! | `Symb` | `s.N` | characters |
//! | `Chr` `Ord` | `e.X` | `e.X` with numbers/characters converted |
//! | `Lenw` | `e.X` | `s.Len e.X` |
//! | `Upper` `Lower` | `e.X` | `e.X` with characters converted |
//! | `Explode` | `s.Ident` | characters |
//! | `Implode` | `e.Chars` | `s.Ident e.Rest`, or `0 e.Chars` |

use crate::error::{Result, RuntimeError};
use crate::eval::Evaluator;
use crate::function::NativeFn;
use refal_core::{Element, Symbol, Term};
use std::sync::Arc;

pub(crate) fn functions() -> Vec<(&'static str, NativeFn)> {
    vec![
        native("Prout", prout),
        native("Print", print),
        native("Card", card),
        native("Add", add),
        native("Sub", sub),
        native("Mul", mul),
        native("Div", div),
        native("Mod", modulo),
        native("Compare", compare),
        native("Numb", numb),
        native("Symb", symb),
        native("Chr", chr),
        native("Ord", ord),
        native("Lenw", lenw),
        native("Upper", upper),
        native("Lower", lower),
        native("Explode", explode),
        native("Implode", implode),
    ]
}

fn native<F>(name: &'static str, f: F) -> (&'static str, NativeFn)
where
    F: Fn(&mut Evaluator<'_>, Term) -> Result<Term> + Send + Sync + 'static,
{
    (name, Arc::new(f))
}

fn recognition_impossible(function: &str, argument: &Term) -> RuntimeError {
    RuntimeError::RecognitionImpossible {
        function: function.to_string(),
        argument: argument.to_string(),
    }
}

// ============================================================================
//                               I/O
// ============================================================================

fn prout(ev: &mut Evaluator<'_>, arg: Term) -> Result<Term> {
    ev.io().write_line(&arg.to_string())?;
    Ok(Term::new())
}

fn print(ev: &mut Evaluator<'_>, arg: Term) -> Result<Term> {
    ev.io().write_line(&arg.to_string())?;
    Ok(arg)
}

fn card(ev: &mut Evaluator<'_>, arg: Term) -> Result<Term> {
    if !arg.is_empty() {
        return Err(recognition_impossible("Card", &arg));
    }
    match ev.io().read_line()? {
        Some(line) => Ok(Term::from_chars(&line)),
        None => Ok(Term::from_elements(vec![Element::Symbol(Symbol::Number(0))])),
    }
}

// ============================================================================
//                            Arithmetic
// ============================================================================

/// Read one operand: `s.N` or `'-' s.N` / `'+' s.N`.
fn signed_number(elements: &[Element]) -> Option<i64> {
    match elements {
        [Element::Symbol(Symbol::Number(n))] => Some(*n),
        [Element::Symbol(Symbol::Char('+')), Element::Symbol(Symbol::Number(n))] => Some(*n),
        [Element::Symbol(Symbol::Char('-')), Element::Symbol(Symbol::Number(n))] => {
            n.checked_neg()
        }
        _ => None,
    }
}

/// Split an arithmetic argument into its two operands.
///
/// Accepted forms: `s.N s.M`, or `(e.N) e.M` where each side is a number
/// optionally preceded by a sign character.
fn operands(function: &str, arg: &Term) -> Result<(i64, i64)> {
    let parsed = match arg.elements() {
        [Element::Symbol(Symbol::Number(a)), Element::Symbol(Symbol::Number(b))] => Some((*a, *b)),
        [Element::Group(first), rest @ ..] => {
            signed_number(first.elements()).zip(signed_number(rest))
        }
        _ => None,
    };
    parsed.ok_or_else(|| recognition_impossible(function, arg))
}

fn number_term(n: i64) -> Term {
    Term::from_elements(vec![Element::Symbol(Symbol::Number(n))])
}

fn arithmetic(
    function: &'static str,
    arg: &Term,
    op: impl Fn(i64, i64) -> Option<i64>,
) -> Result<Term> {
    let (a, b) = operands(function, arg)?;
    op(a, b)
        .map(number_term)
        .ok_or_else(|| RuntimeError::library(function, format!("integer overflow ({} and {})", a, b)))
}

fn add(_: &mut Evaluator<'_>, arg: Term) -> Result<Term> {
    arithmetic("Add", &arg, i64::checked_add)
}

fn sub(_: &mut Evaluator<'_>, arg: Term) -> Result<Term> {
    arithmetic("Sub", &arg, i64::checked_sub)
}

fn mul(_: &mut Evaluator<'_>, arg: Term) -> Result<Term> {
    arithmetic("Mul", &arg, i64::checked_mul)
}

fn div(_: &mut Evaluator<'_>, arg: Term) -> Result<Term> {
    if operands("Div", &arg)?.1 == 0 {
        return Err(RuntimeError::library("Div", "division by zero"));
    }
    arithmetic("Div", &arg, i64::checked_div)
}

fn modulo(_: &mut Evaluator<'_>, arg: Term) -> Result<Term> {
    if operands("Mod", &arg)?.1 == 0 {
        return Err(RuntimeError::library("Mod", "division by zero"));
    }
    arithmetic("Mod", &arg, i64::checked_rem)
}

fn compare(_: &mut Evaluator<'_>, arg: Term) -> Result<Term> {
    let (a, b) = operands("Compare", &arg)?;
    let sign = match a.cmp(&b) {
        std::cmp::Ordering::Less => '-',
        std::cmp::Ordering::Equal => '0',
        std::cmp::Ordering::Greater => '+',
    };
    Ok(Term::from_elements(vec![Element::Symbol(Symbol::Char(sign))]))
}

// ============================================================================
//                         Symbol conversion
// ============================================================================

/// Leading characters of a term, up to the first non-character element.
fn leading_chars(arg: &Term) -> String {
    arg.iter()
        .map_while(|e| e.as_symbol().and_then(Symbol::as_char))
        .collect()
}

fn numb(_: &mut Evaluator<'_>, arg: Term) -> Result<Term> {
    let text = leading_chars(&arg);
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(&text)),
    };
    let digits: String = digits.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Ok(number_term(0));
    }

    let signed = if negative {
        format!("-{}", digits)
    } else {
        digits
    };
    signed
        .parse::<i64>()
        .map(number_term)
        .map_err(|_| RuntimeError::library("Numb", format!("number out of range: {}", signed)))
}

fn symb(_: &mut Evaluator<'_>, arg: Term) -> Result<Term> {
    match arg.elements() {
        [Element::Symbol(Symbol::Number(n))] => Ok(Term::from_chars(&n.to_string())),
        _ => Err(recognition_impossible("Symb", &arg)),
    }
}

/// Rebuild a term, mapping every symbol and descending into groups.
fn map_symbols(term: Term, f: &impl Fn(Symbol) -> Result<Symbol>) -> Result<Term> {
    term.into_iter()
        .map(|element| match element {
            Element::Symbol(s) => f(s).map(Element::Symbol),
            Element::Group(inner) => map_symbols(inner, f).map(Element::Group),
        })
        .collect::<Result<Vec<_>>>()
        .map(Term::from_elements)
}

fn chr(_: &mut Evaluator<'_>, arg: Term) -> Result<Term> {
    map_symbols(arg, &|s| match s {
        Symbol::Number(n) => u32::try_from(n)
            .ok()
            .and_then(char::from_u32)
            .map(Symbol::Char)
            .ok_or_else(|| RuntimeError::library("Chr", format!("{} is not a character code", n))),
        other => Ok(other),
    })
}

fn ord(_: &mut Evaluator<'_>, arg: Term) -> Result<Term> {
    map_symbols(arg, &|s| match s {
        Symbol::Char(c) => Ok(Symbol::Number(c as i64)),
        other => Ok(other),
    })
}

fn lenw(_: &mut Evaluator<'_>, arg: Term) -> Result<Term> {
    let mut out = number_term(arg.len() as i64);
    out.append(arg);
    Ok(out)
}

/// Single-char case mapping; characters whose mapping is longer stay as is.
fn convert_case(c: char, mut mapped: impl Iterator<Item = char>) -> char {
    match (mapped.next(), mapped.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

fn upper(_: &mut Evaluator<'_>, arg: Term) -> Result<Term> {
    map_symbols(arg, &|s| match s {
        Symbol::Char(c) => Ok(Symbol::Char(convert_case(c, c.to_uppercase()))),
        other => Ok(other),
    })
}

fn lower(_: &mut Evaluator<'_>, arg: Term) -> Result<Term> {
    map_symbols(arg, &|s| match s {
        Symbol::Char(c) => Ok(Symbol::Char(convert_case(c, c.to_lowercase()))),
        other => Ok(other),
    })
}

fn explode(_: &mut Evaluator<'_>, arg: Term) -> Result<Term> {
    match arg.elements() {
        [Element::Symbol(Symbol::Ident(name))] => Ok(Term::from_chars(name)),
        _ => Err(recognition_impossible("Explode", &arg)),
    }
}

fn implode(_: &mut Evaluator<'_>, arg: Term) -> Result<Term> {
    let starts_with_letter = matches!(
        arg.get(0),
        Some(Element::Symbol(Symbol::Char(c))) if c.is_alphabetic()
    );
    if !starts_with_letter {
        let mut out = number_term(0);
        out.append(arg);
        return Ok(out);
    }

    let ident: String = arg
        .iter()
        .map_while(|e| match e {
            Element::Symbol(Symbol::Char(c)) if c.is_alphanumeric() || *c == '-' || *c == '_' => {
                Some(*c)
            }
            _ => None,
        })
        .collect();
    let consumed = ident.chars().count();

    let mut elements = arg.into_elements();
    let rest = elements.split_off(consumed);
    let mut out = Term::from_elements(vec![Element::Symbol(Symbol::ident(&ident))]);
    out.append(Term::from_elements(rest));
    Ok(out)
}
