use unicode_width::UnicodeWidthStr;

const FRAMES: [char; 10] = ['✦', '✧', '✶', '✷', '✸', '✹', '✺', '✻', '✼', '✽'];

/// Spinner frame for the given tick
pub fn frame(tick: usize) -> char {
    FRAMES.get(tick % FRAMES.len()).copied().unwrap_or('✦')
}

/// `"<frame> <label>"` padded on the left to sit centred in `area_width`
/// columns. Lines wider than the area are not padded.
pub fn spinner_line(tick: usize, label: &str, area_width: usize) -> String {
    let text = format!("{} {label}", frame(tick));
    let padding = area_width.saturating_sub(text.width()) / 2;
    format!("{}{text}", " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_cycle() {
        assert_eq!(frame(0), frame(FRAMES.len()));
        assert_ne!(frame(0), frame(1));
    }

    #[test]
    fn test_spinner_line_is_centred() {
        let text = spinner_line(0, "Loading files...", 40);
        let content_width = format!("{} Loading files...", frame(0)).width();
        assert!(text.ends_with("Loading files..."));
        assert_eq!(text.len() - text.trim_start().len(), (40 - content_width) / 2);
    }

    #[test]
    fn test_wide_label_is_not_padded() {
        let text = spinner_line(3, "Regenerating...", 4);
        assert!(text.starts_with(frame(3)));
    }
}
