//! Constructors for the query language's built-in functions.
//!
//! Each one is a thin wrapper over [`Expr::call`]. Names that collide with
//! Rust keywords or prelude items carry a trailing underscore (`if_`,
//! `true_`). Functions missing here can be called with [`Expr::call`].

use super::ast::Expr;

fn call<const N: usize>(name: &str, args: [Expr; N]) -> Expr {
    Expr::call(name, args)
}

fn call_all<I, E>(name: &str, args: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    Expr::call(name, args)
}

// Logical

pub fn if_(condition: impl Into<Expr>, if_true: impl Into<Expr>, if_false: impl Into<Expr>) -> Expr {
    call("IF", [condition.into(), if_true.into(), if_false.into()])
}

/// `SWITCH(expression, pattern, result, ..., [default])`.
pub fn switch<I, P, R>(expression: impl Into<Expr>, cases: I, default: Option<Expr>) -> Expr
where
    I: IntoIterator<Item = (P, R)>,
    P: Into<Expr>,
    R: Into<Expr>,
{
    let mut args = vec![expression.into()];
    for (pattern, result) in cases {
        args.push(pattern.into());
        args.push(result.into());
    }
    args.extend(default);
    Expr::call("SWITCH", args)
}

pub fn blank() -> Expr {
    call("BLANK", [])
}

pub fn true_() -> Expr {
    call("TRUE", [])
}

pub fn false_() -> Expr {
    call("FALSE", [])
}

pub fn is_error(expression: impl Into<Expr>) -> Expr {
    call("ISERROR", [expression.into()])
}

pub fn error() -> Expr {
    call("ERROR", [])
}

// Text

/// Position of `needle` in `haystack`, or 0 when absent.
pub fn find(needle: impl Into<Expr>, haystack: impl Into<Expr>) -> Expr {
    call("FIND", [needle.into(), haystack.into()])
}

pub fn find_from(needle: impl Into<Expr>, haystack: impl Into<Expr>, start: impl Into<Expr>) -> Expr {
    call("FIND", [needle.into(), haystack.into(), start.into()])
}

/// Like [`find`], but blank rather than 0 when absent.
pub fn search(needle: impl Into<Expr>, haystack: impl Into<Expr>) -> Expr {
    call("SEARCH", [needle.into(), haystack.into()])
}

pub fn search_from(needle: impl Into<Expr>, haystack: impl Into<Expr>, start: impl Into<Expr>) -> Expr {
    call("SEARCH", [needle.into(), haystack.into(), start.into()])
}

pub fn concatenate<I, E>(texts: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    call_all("CONCATENATE", texts)
}

pub fn lower(text: impl Into<Expr>) -> Expr {
    call("LOWER", [text.into()])
}

pub fn upper(text: impl Into<Expr>) -> Expr {
    call("UPPER", [text.into()])
}

pub fn len(text: impl Into<Expr>) -> Expr {
    call("LEN", [text.into()])
}

pub fn trim(text: impl Into<Expr>) -> Expr {
    call("TRIM", [text.into()])
}

pub fn left(text: impl Into<Expr>, count: impl Into<Expr>) -> Expr {
    call("LEFT", [text.into(), count.into()])
}

pub fn right(text: impl Into<Expr>, count: impl Into<Expr>) -> Expr {
    call("RIGHT", [text.into(), count.into()])
}

pub fn mid(text: impl Into<Expr>, start: impl Into<Expr>, count: impl Into<Expr>) -> Expr {
    call("MID", [text.into(), start.into(), count.into()])
}

pub fn replace(
    text: impl Into<Expr>,
    start: impl Into<Expr>,
    count: impl Into<Expr>,
    replacement: impl Into<Expr>,
) -> Expr {
    call(
        "REPLACE",
        [text.into(), start.into(), count.into(), replacement.into()],
    )
}

pub fn rept(text: impl Into<Expr>, times: impl Into<Expr>) -> Expr {
    call("REPT", [text.into(), times.into()])
}

pub fn substitute(text: impl Into<Expr>, old: impl Into<Expr>, new: impl Into<Expr>) -> Expr {
    call("SUBSTITUTE", [text.into(), old.into(), new.into()])
}

/// Replaces only the `index`-th occurrence of `old`.
pub fn substitute_nth(
    text: impl Into<Expr>,
    old: impl Into<Expr>,
    new: impl Into<Expr>,
    index: impl Into<Expr>,
) -> Expr {
    call(
        "SUBSTITUTE",
        [text.into(), old.into(), new.into(), index.into()],
    )
}

/// The argument if it is text, blank otherwise.
pub fn t(value: impl Into<Expr>) -> Expr {
    call("T", [value.into()])
}

pub fn encode_url_component(text: impl Into<Expr>) -> Expr {
    call("ENCODE_URL_COMPONENT", [text.into()])
}

pub fn regex_match(text: impl Into<Expr>, regex: impl Into<Expr>) -> Expr {
    call("REGEX_MATCH", [text.into(), regex.into()])
}

pub fn regex_extract(text: impl Into<Expr>, regex: impl Into<Expr>) -> Expr {
    call("REGEX_EXTRACT", [text.into(), regex.into()])
}

pub fn regex_replace(text: impl Into<Expr>, regex: impl Into<Expr>, replacement: impl Into<Expr>) -> Expr {
    call("REGEX_REPLACE", [text.into(), regex.into(), replacement.into()])
}

// Numeric

pub fn abs(value: impl Into<Expr>) -> Expr {
    call("ABS", [value.into()])
}

pub fn ceiling(value: impl Into<Expr>) -> Expr {
    call("CEILING", [value.into()])
}

/// Rounds up to the nearest multiple of `significance`.
pub fn ceiling_to(value: impl Into<Expr>, significance: impl Into<Expr>) -> Expr {
    call("CEILING", [value.into(), significance.into()])
}

pub fn floor(value: impl Into<Expr>) -> Expr {
    call("FLOOR", [value.into()])
}

pub fn floor_to(value: impl Into<Expr>, significance: impl Into<Expr>) -> Expr {
    call("FLOOR", [value.into(), significance.into()])
}

pub fn int(value: impl Into<Expr>) -> Expr {
    call("INT", [value.into()])
}

pub fn even(value: impl Into<Expr>) -> Expr {
    call("EVEN", [value.into()])
}

pub fn odd(value: impl Into<Expr>) -> Expr {
    call("ODD", [value.into()])
}

pub fn round(value: impl Into<Expr>, precision: impl Into<Expr>) -> Expr {
    call("ROUND", [value.into(), precision.into()])
}

pub fn round_up(value: impl Into<Expr>, precision: impl Into<Expr>) -> Expr {
    call("ROUNDUP", [value.into(), precision.into()])
}

pub fn round_down(value: impl Into<Expr>, precision: impl Into<Expr>) -> Expr {
    call("ROUNDDOWN", [value.into(), precision.into()])
}

pub fn mod_(value: impl Into<Expr>, divisor: impl Into<Expr>) -> Expr {
    call("MOD", [value.into(), divisor.into()])
}

pub fn power(base: impl Into<Expr>, exponent: impl Into<Expr>) -> Expr {
    call("POWER", [base.into(), exponent.into()])
}

pub fn sqrt(value: impl Into<Expr>) -> Expr {
    call("SQRT", [value.into()])
}

pub fn exp(power: impl Into<Expr>) -> Expr {
    call("EXP", [power.into()])
}

/// Base-10 logarithm.
pub fn log(number: impl Into<Expr>) -> Expr {
    call("LOG", [number.into()])
}

pub fn log_base(number: impl Into<Expr>, base: impl Into<Expr>) -> Expr {
    call("LOG", [number.into(), base.into()])
}

pub fn sum<I, E>(numbers: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    call_all("SUM", numbers)
}

pub fn average<I, E>(numbers: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    call_all("AVERAGE", numbers)
}

pub fn max<I, E>(numbers: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    call_all("MAX", numbers)
}

pub fn min<I, E>(numbers: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    call_all("MIN", numbers)
}

pub fn count<I, E>(values: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    call_all("COUNT", values)
}

pub fn counta<I, E>(values: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    call_all("COUNTA", values)
}

/// Counts every value, blanks included.
pub fn countall<I, E>(values: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    call_all("COUNTALL", values)
}

pub fn value(text: impl Into<Expr>) -> Expr {
    call("VALUE", [text.into()])
}

// Date and time

pub fn now() -> Expr {
    call("NOW", [])
}

pub fn today() -> Expr {
    call("TODAY", [])
}

pub fn created_time() -> Expr {
    call("CREATED_TIME", [])
}

/// `LAST_MODIFIED_TIME()`, optionally limited to the given fields.
pub fn last_modified_time<I, E>(fields: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    call_all("LAST_MODIFIED_TIME", fields)
}

pub fn datetime_parse(date: impl Into<Expr>) -> Expr {
    call("DATETIME_PARSE", [date.into()])
}

pub fn datetime_parse_with(date: impl Into<Expr>, input_format: impl Into<Expr>) -> Expr {
    call("DATETIME_PARSE", [date.into(), input_format.into()])
}

pub fn datetime_parse_with_locale(
    date: impl Into<Expr>,
    input_format: impl Into<Expr>,
    locale: impl Into<Expr>,
) -> Expr {
    call(
        "DATETIME_PARSE",
        [date.into(), input_format.into(), locale.into()],
    )
}

pub fn datetime_format(date: impl Into<Expr>) -> Expr {
    call("DATETIME_FORMAT", [date.into()])
}

pub fn datetime_format_with(date: impl Into<Expr>, output_format: impl Into<Expr>) -> Expr {
    call("DATETIME_FORMAT", [date.into(), output_format.into()])
}

pub fn datetime_diff(date1: impl Into<Expr>, date2: impl Into<Expr>, units: impl Into<Expr>) -> Expr {
    call("DATETIME_DIFF", [date1.into(), date2.into(), units.into()])
}

pub fn dateadd(date: impl Into<Expr>, count: impl Into<Expr>, units: impl Into<Expr>) -> Expr {
    call("DATEADD", [date.into(), count.into(), units.into()])
}

pub fn datestr(date: impl Into<Expr>) -> Expr {
    call("DATESTR", [date.into()])
}

pub fn timestr(timestamp: impl Into<Expr>) -> Expr {
    call("TIMESTR", [timestamp.into()])
}

pub fn tonow(date: impl Into<Expr>) -> Expr {
    call("TONOW", [date.into()])
}

pub fn fromnow(date: impl Into<Expr>) -> Expr {
    call("FROMNOW", [date.into()])
}

pub fn set_locale(date: impl Into<Expr>, locale: impl Into<Expr>) -> Expr {
    call("SET_LOCALE", [date.into(), locale.into()])
}

pub fn set_timezone(date: impl Into<Expr>, timezone: impl Into<Expr>) -> Expr {
    call("SET_TIMEZONE", [date.into(), timezone.into()])
}

pub fn is_after(date1: impl Into<Expr>, date2: impl Into<Expr>) -> Expr {
    call("IS_AFTER", [date1.into(), date2.into()])
}

pub fn is_before(date1: impl Into<Expr>, date2: impl Into<Expr>) -> Expr {
    call("IS_BEFORE", [date1.into(), date2.into()])
}

pub fn is_same(date1: impl Into<Expr>, date2: impl Into<Expr>, unit: impl Into<Expr>) -> Expr {
    call("IS_SAME", [date1.into(), date2.into(), unit.into()])
}

pub fn year(date: impl Into<Expr>) -> Expr {
    call("YEAR", [date.into()])
}

pub fn month(date: impl Into<Expr>) -> Expr {
    call("MONTH", [date.into()])
}

pub fn day(date: impl Into<Expr>) -> Expr {
    call("DAY", [date.into()])
}

pub fn hour(datetime: impl Into<Expr>) -> Expr {
    call("HOUR", [datetime.into()])
}

pub fn minute(datetime: impl Into<Expr>) -> Expr {
    call("MINUTE", [datetime.into()])
}

pub fn second(datetime: impl Into<Expr>) -> Expr {
    call("SECOND", [datetime.into()])
}

pub fn weekday(date: impl Into<Expr>) -> Expr {
    call("WEEKDAY", [date.into()])
}

/// `start_day` is `'Sunday'` or `'Monday'`.
pub fn weekday_from(date: impl Into<Expr>, start_day: impl Into<Expr>) -> Expr {
    call("WEEKDAY", [date.into(), start_day.into()])
}

pub fn weeknum(date: impl Into<Expr>) -> Expr {
    call("WEEKNUM", [date.into()])
}

pub fn weeknum_from(date: impl Into<Expr>, start_day: impl Into<Expr>) -> Expr {
    call("WEEKNUM", [date.into(), start_day.into()])
}

pub fn workday(start: impl Into<Expr>, days: impl Into<Expr>) -> Expr {
    call("WORKDAY", [start.into(), days.into()])
}

/// `holidays` is a comma-separated string of dates.
pub fn workday_with_holidays(
    start: impl Into<Expr>,
    days: impl Into<Expr>,
    holidays: impl Into<Expr>,
) -> Expr {
    call("WORKDAY", [start.into(), days.into(), holidays.into()])
}

pub fn workday_diff(start: impl Into<Expr>, end: impl Into<Expr>) -> Expr {
    call("WORKDAY_DIFF", [start.into(), end.into()])
}

pub fn workday_diff_with_holidays(
    start: impl Into<Expr>,
    end: impl Into<Expr>,
    holidays: impl Into<Expr>,
) -> Expr {
    call("WORKDAY_DIFF", [start.into(), end.into(), holidays.into()])
}

// Record

pub fn record_id() -> Expr {
    call("RECORD_ID", [])
}
