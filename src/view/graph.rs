//! Character-cell history graphs.

use crate::config::GraphSymbol;

const TTY: [char; 3] = ['_', '▄', '█'];
const BLOCK: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Braille patterns U+2800..=U+283F, empty to six dots.
fn braille() -> Vec<char> {
    (0x2800u32..=0x283F).filter_map(char::from_u32).collect()
}

/// Glyph ramp for a symbol set, emptiest first.
pub fn ramp(symbol: GraphSymbol) -> Vec<char> {
    match symbol {
        GraphSymbol::Braille => braille(),
        GraphSymbol::Block => BLOCK.to_vec(),
        GraphSymbol::Tty => TTY.to_vec(),
    }
}

/// Renders the most recent `width` values as `height` rows, top row first.
///
/// Shorter series are left-padded with zeros. Each column is filled from
/// the bottom up to `min(height - 1, floor(v / max * height))`. A series
/// that is empty or all zero renders as blank rows.
pub fn render_graph(values: &[f64], width: usize, height: usize, symbol: GraphSymbol) -> Vec<String> {
    let blank = vec![" ".repeat(width); height];
    if width == 0 || height == 0 {
        return blank;
    }

    let tail = &values[values.len().saturating_sub(width)..];
    let max = tail.iter().copied().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return blank;
    }

    let glyphs = ramp(symbol);
    let (empty, filled) = match (glyphs.first(), glyphs.last()) {
        (Some(&e), Some(&f)) => (e, f),
        _ => return blank,
    };

    let levels: Vec<usize> = std::iter::repeat_n(0.0, width - tail.len())
        .chain(tail.iter().copied())
        .map(|v| {
            let scaled = (v.max(0.0) / max * height as f64).floor() as usize;
            scaled.min(height - 1)
        })
        .collect();

    (0..height)
        .rev()
        .map(|y| {
            levels
                .iter()
                .map(|&level| if level >= y { filled } else { empty })
                .collect()
        })
        .collect()
}

/// One-row graph picking a glyph per value from the full ramp.
///
/// Used for the per-process trend column where a single row has to show
/// relative magnitude.
pub fn sparkline(values: &[f64], width: usize, symbol: GraphSymbol) -> String {
    let tail = &values[values.len().saturating_sub(width)..];
    let max = tail.iter().copied().fold(0.0_f64, f64::max);
    let pad = " ".repeat(width - tail.len());
    if max <= 0.0 {
        return " ".repeat(width);
    }
    let glyphs = match symbol {
        // braille cells are not ordered by fill, use the block ramp
        GraphSymbol::Braille | GraphSymbol::Block => BLOCK.to_vec(),
        GraphSymbol::Tty => TTY.to_vec(),
    };
    let top = glyphs.len() - 1;
    let line: String = tail
        .iter()
        .map(|&v| {
            let idx = ((v.max(0.0) / max) * top as f64).round() as usize;
            glyphs[idx.min(top)]
        })
        .collect();
    pad + &line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_sizes() {
        assert_eq!(ramp(GraphSymbol::Tty).len(), 3);
        assert_eq!(ramp(GraphSymbol::Block).len(), 8);
        let braille = ramp(GraphSymbol::Braille);
        assert_eq!(braille.len(), 64);
        assert_eq!(braille[0], '⠀');
        assert_eq!(braille[63], '⠿');
    }

    #[test]
    fn test_all_zero_is_blank() {
        let rows = render_graph(&[0.0, 0.0, 0.0], 5, 3, GraphSymbol::Block);
        assert_eq!(rows, vec!["     "; 3]);
        let rows = render_graph(&[], 4, 2, GraphSymbol::Braille);
        assert_eq!(rows, vec!["    "; 2]);
    }

    #[test]
    fn test_bottom_row_full_top_row_only_max() {
        let h = 4;
        let values = [0.0, h as f64, 2.0 * h as f64];
        let rows = render_graph(&values, 3, h, GraphSymbol::Tty);
        assert_eq!(rows.len(), h);
        // levels are [0, 2, 3]
        assert_eq!(rows[0], "__█");
        assert_eq!(rows[1], "_██");
        assert_eq!(rows[3], "███");
    }

    #[test]
    fn test_sparkline() {
        assert_eq!(sparkline(&[0.0, 0.0], 4, GraphSymbol::Block), "    ");
        assert_eq!(sparkline(&[0.0, 7.0], 4, GraphSymbol::Block), "  ▁█");
        assert_eq!(sparkline(&[1.0, 2.0, 3.0], 2, GraphSymbol::Tty), "▄█");
    }

    #[test]
    fn test_left_pad_and_window() {
        let rows = render_graph(&[1.0], 3, 1, GraphSymbol::Block);
        // single row: every column has level 0 >= 0
        assert_eq!(rows, vec!["███"]);

        let rows = render_graph(&[9.0, 9.0, 0.0, 5.0], 2, 2, GraphSymbol::Tty);
        // only [0, 5] visible; 9s fall outside the window
        assert_eq!(rows, vec!["_█", "██"]);
    }
}
