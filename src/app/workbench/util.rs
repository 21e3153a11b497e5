use ratatui::layout::Rect;

pub(super) fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let width = area.width.saturating_mul(width_percent).saturating_div(100);
    let min_width = 10.min(area.width);
    let width = width.max(min_width).min(area.width);

    let min_height = 3.min(area.height);
    let height = height.max(min_height).min(area.height);

    let x = area.x + (area.width.saturating_sub(width) / 2);
    let y = area.y + (area.height.saturating_sub(height) / 2);

    Rect::new(x, y, width, height)
}

pub(super) fn sidebar_width(available: u16) -> u16 {
    if available == 0 {
        return 0;
    }

    let desired = available
        .saturating_mul(super::SIDEBAR_WIDTH_PERCENT)
        .saturating_div(100);
    let min_width = super::SIDEBAR_MIN_WIDTH.min(available);
    let max_width = available.saturating_sub(10).max(min_width);

    desired.max(min_width).min(max_width)
}

/// First line to draw so that `cursor` stays inside a window of `height` lines.
pub(super) fn scroll_to_keep(scroll: usize, cursor: usize, height: usize) -> usize {
    let height = height.max(1);
    if cursor < scroll {
        cursor
    } else if cursor >= scroll + height {
        cursor + 1 - height
    } else {
        scroll
    }
}
