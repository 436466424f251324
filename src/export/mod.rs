use anyhow::Result;
use fs_err as fs;
use std::path::Path;

/// Characters LaTeX treats as markup; each gets a backslash in front.
const SPECIAL: [char; 7] = ['$', '&', '%', '#', '_', '{', '}'];

const TEMPLATE_HEAD: &str = r"\documentclass{article}
\usepackage[utf8]{inputenc}
\usepackage{geometry}
\usepackage{titling}
\usepackage{xcolor}
\usepackage{enumitem}
\geometry{a4paper, margin=1in}
\title{Chikki Outfit Suggestion}
\author{Chikki Fashion Stylist}
\date{\today}
\begin{document}
\maketitle
\section*{Your Stylish Outfit}
\vspace{10pt}
\noindent
\textbf{Generated on:} \today \\
\vspace{10pt}
\noindent
\textbf{Outfit Details:} \\
\begin{verbatim}
";

const TEMPLATE_TAIL: &str = r"
\end{verbatim}
\end{document}
";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if SPECIAL.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Wrap a suggestion in the LaTeX document offered for download.
pub fn to_document(suggestion: &str) -> String {
    let mut doc = String::with_capacity(TEMPLATE_HEAD.len() + suggestion.len() + TEMPLATE_TAIL.len());
    doc.push_str(TEMPLATE_HEAD);
    doc.push_str(&escape(suggestion));
    doc.push_str(TEMPLATE_TAIL);
    doc
}

pub fn write_document(path: &Path, suggestion: &str) -> Result<()> {
    fs::write(path, to_document(suggestion))?;
    tracing::info!(path = %path.display(), "suggestion exported");
    Ok(())
}
