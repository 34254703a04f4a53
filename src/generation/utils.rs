//! String transformation utilities for code generation
//!
//! These helpers build Go identifier fragments and file names from the
//! service and resource-type names supplied by the caller.

/// Suffix shared by every generated sweepers file.
///
/// The `_test` part is what places the functions in the package's test build.
pub const OUTPUT_FILE_SUFFIX: &str = "_sweepers_test.go";

/// Title-cases the first letter of each word, leaving every other character alone.
///
/// Word boundaries follow Go's `strings.Title`: ASCII characters other than
/// letters, digits and `_` separate words, as does Unicode whitespace.
/// Unlike Tera's built-in `title` filter the rest of each word keeps its case,
/// which matters for names like `elasticBeanstalk`.
///
/// # Examples
/// ```
/// use sweepergen::generation::utils::title_case;
///
/// assert_eq!(title_case("s3"), "S3");
/// assert_eq!(title_case("elasticBeanstalk"), "ElasticBeanstalk");
/// assert_eq!(title_case("api gateway"), "Api Gateway");
/// ```
pub fn title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev = ' ';

    for ch in s.chars() {
        if is_word_separator(prev) {
            push_title(&mut result, ch);
        } else {
            result.push(ch);
        }
        prev = ch;
    }

    result
}

/// Title-case mapping, which differs from upper case only for the Latin digraphs
fn push_title(out: &mut String, ch: char) {
    match ch {
        '\u{01C4}'..='\u{01C6}' => out.push('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => out.push('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => out.push('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => out.push('\u{01F2}'),
        _ => out.extend(ch.to_uppercase()),
    }
}

fn is_word_separator(ch: char) -> bool {
    if ch.is_ascii() {
        return !(ch.is_ascii_alphanumeric() || ch == '_');
    }
    if ch.is_alphanumeric() {
        return false;
    }
    ch.is_whitespace()
}

/// Name of the generated file for a service, e.g. `gen_s3_sweepers_test.go`
pub fn output_file_name(service_name: &str) -> String {
    format!("gen_{service_name}{OUTPUT_FILE_SUFFIX}")
}
