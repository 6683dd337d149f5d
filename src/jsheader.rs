//! Read and replace the `/** ... */` header comment at the top of JS code.
//!
//! ```
//! use seabuild::jsheader::{get_header, set_header};
//!
//! let js = set_header("var x = 1;\n", "Seadragon Ajax\nBSD License");
//! assert_eq!(js, "/**\n * Seadragon Ajax\n * BSD License\n */\nvar x = 1;\n");
//! assert_eq!(get_header(&js), "/**\n * Seadragon Ajax\n * BSD License\n */\n");
//! assert_eq!(set_header(&js, ""), "var x = 1;\n");
//! ```

const TOKEN_BEGIN: &str = "/**";
const TOKEN_MID: &str = " * ";
const TOKEN_END: &str = " */\n";

/// Render text as a block comment. Empty text renders as nothing.
pub fn comment(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut output = vec![TOKEN_BEGIN.to_owned()];
    for line in text.trim().split('\n') {
        output.push(format!("{}{}", TOKEN_MID, line));
    }
    output.push(TOKEN_END.to_owned());
    output.join("\n")
}

/// The header comment the code starts with, or "" if it doesn't start with one.
pub fn get_header(js: &str) -> &str {
    if !js.starts_with(TOKEN_BEGIN) {
        return "";
    }
    match js.find(TOKEN_END) {
        Some(pos) => &js[..pos + TOKEN_END.len()],
        None => "",
    }
}

/// Replace the existing header (if any) with one rendered from `header`.
pub fn set_header(js: &str, header: &str) -> String {
    let old = get_header(js);
    comment(header) + &js[old.len()..]
}
