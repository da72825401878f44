/// Final output of a run plus its size metrics. Word and character counts are
/// computed over the concatenated text only; the total length covers the full
/// assembled output including the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub final_text: String,
    pub word_count: usize,
    pub char_count: usize,
    pub total_length: usize,
}

pub fn assemble(manifest: &str, concatenated: &str) -> Report {
    let final_text = format!(
        "Output File Tree:\n{}\n\nConcatenated Contents:\n{}",
        manifest, concatenated
    );
    Report {
        word_count: concatenated.split_whitespace().count(),
        char_count: concatenated.chars().count(),
        total_length: final_text.chars().count(),
        final_text,
    }
}
