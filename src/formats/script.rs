use crate::{error::FormatError, formats::time::format_clock_label, model::TimedWord};

/// One block of the timestamped script view.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptBlock {
    pub label: String,
    pub text: String,
}

struct Bucket<'a> {
    anchor: f64,
    last_start: f64,
    words: Vec<&'a str>,
}

impl<'a> Bucket<'a> {
    fn open(word: &'a TimedWord) -> Self {
        Self {
            anchor: word.start_time,
            last_start: word.start_time,
            words: vec![word.word.as_str()],
        }
    }

    fn close(self) -> ScriptBlock {
        ScriptBlock {
            label: format!(
                "[{} - {}]",
                format_clock_label(self.anchor),
                format_clock_label(self.last_start)
            ),
            text: self.words.join(" ").trim().to_string(),
        }
    }
}

/// Groups words into blocks spanning at most `window_seconds` from each
/// block's first word.
///
/// A block's label runs from its first word's start to its last word's start.
/// Empty input yields no blocks.
pub fn group_by_time_window(
    words: &[TimedWord],
    window_seconds: f64,
) -> Result<Vec<ScriptBlock>, FormatError> {
    if !window_seconds.is_finite() || window_seconds <= 0.0 {
        return Err(FormatError::InvalidParameter {
            name: "window_seconds",
            reason: format!("must be a positive number of seconds, got {window_seconds}"),
        });
    }

    let mut blocks = Vec::new();
    let mut current: Option<Bucket> = None;

    for w in words {
        match current.as_mut() {
            Some(bucket) if w.start_time - bucket.anchor <= window_seconds => {
                bucket.words.push(&w.word);
                bucket.last_start = w.start_time;
            }
            _ => {
                if let Some(done) = current.replace(Bucket::open(w)) {
                    blocks.push(done.close());
                }
            }
        }
    }

    if let Some(done) = current {
        blocks.push(done.close());
    }

    Ok(blocks)
}

pub fn render_script(blocks: &[ScriptBlock]) -> String {
    blocks
        .iter()
        .map(|b| format!("{}\n{}", b.label, b.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}
