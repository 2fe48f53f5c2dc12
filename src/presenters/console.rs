use crate::core::data::{ElementState, Snapshot};

const BAR_WIDTH: usize = 40;

fn state_glyph(state: ElementState) -> char {
    match state {
        ElementState::Normal => ' ',
        ElementState::Compare => '?',
        ElementState::Swap => 'x',
        ElementState::Pivot => '^',
        ElementState::Sorted => '*',
    }
}

/// Renders a snapshot as horizontal text bars scaled against the
/// dataset's maximum value.
#[must_use]
pub fn render_bars(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let max = snapshot.max_value.max(1) as f64;

    for element in &snapshot.elements {
        let scaled = (f64::from(element.value()) / max * BAR_WIDTH as f64).round();
        let width = scaled.max(0.0) as usize;
        out.push(state_glyph(element.state()));
        out.push(' ');
        for _ in 0..width {
            out.push('#');
        }
        out.push_str(&format!(" {}\n", element.value()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::Dataset;

    #[test]
    fn bars_scale_against_the_maximum_value() {
        let snapshot = Snapshot::of(&Dataset::from_values(&[40, 20]));

        let rendered = render_bars(&snapshot);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].matches('#').count(), BAR_WIDTH);
        assert_eq!(lines[1].matches('#').count(), BAR_WIDTH / 2);
        assert!(lines[0].ends_with(" 40"));
    }

    #[test]
    fn empty_snapshot_renders_nothing() {
        let snapshot = Snapshot::of(&Dataset::from_values(&[]));

        assert!(render_bars(&snapshot).is_empty());
    }

    #[test]
    fn sorted_elements_carry_their_glyph() {
        let mut dataset = Dataset::from_values(&[5]);
        dataset.mark_all_sorted();
        let snapshot = Snapshot::of(&dataset);

        assert!(render_bars(&snapshot).starts_with('*'));
    }
}
