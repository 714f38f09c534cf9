use crate::{
    quake::legend::{depth_legend, LegendRow},
    rendering::context::{DrawCommand, RenderContext},
    traits::MapControl,
    ui::elements::Position,
    Result,
};

/// Depth color legend
pub struct LegendControl {
    id: String,
    position: Position,
    rows: Vec<LegendRow>,
    visible: bool,
}

impl LegendControl {
    pub fn new(id: String, rows: Vec<LegendRow>) -> Self {
        Self {
            id,
            position: Position::BottomRight,
            rows,
            visible: true,
        }
    }

    /// Legend of the standard depth buckets
    pub fn depth() -> Self {
        Self::new("legend".to_string(), depth_legend())
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn rows(&self) -> &[LegendRow] {
        &self.rows
    }

    /// Legend body as an HTML fragment, one swatch per row
    pub fn html(&self) -> String {
        let last = self.rows.len().saturating_sub(1);
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let line_end = if i < last { "<br>" } else { "" };
                format!(
                    "<i style=\"background:{}\"></i> {}{}",
                    row.color, row.label, line_end
                )
            })
            .collect()
    }
}

impl MapControl for LegendControl {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn render(&self, context: &mut RenderContext) -> Result<()> {
        context.render_control(DrawCommand::Legend {
            position: self.position,
            rows: self.rows.clone(),
            html: self.html(),
        });
        Ok(())
    }
}
