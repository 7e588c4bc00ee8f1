//! Template plan precomputation for overlap scoring.

use crate::template::Template;

/// Ink coordinates of a template, gathered once so scoring only visits ink.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    label: String,
    width: usize,
    height: usize,
    ink: Vec<(isize, isize)>,
}

impl TemplatePlan {
    /// Builds a plan from a template.
    pub fn from_template(tpl: &Template) -> Self {
        let bitmap = tpl.bitmap();
        let ink = bitmap
            .ink_points()
            .map(|(x, y)| (x as isize, y as isize))
            .collect();
        Self {
            label: tpl.label().to_owned(),
            width: bitmap.width(),
            height: bitmap.height(),
            ink,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Ink coordinates in row-major order.
    pub fn ink(&self) -> &[(isize, isize)] {
        &self.ink
    }

    /// Number of ink pixels in the template.
    pub fn ink_count(&self) -> usize {
        self.ink.len()
    }
}

#[cfg(test)]
mod tests {
    use super::TemplatePlan;
    use crate::image::Bitmap;
    use crate::template::Template;

    #[test]
    fn plan_collects_ink_in_row_major_order() {
        let bitmap = Bitmap::from_ascii(".#\n#.").unwrap();
        let plan = TemplatePlan::from_template(&Template::new("x", bitmap).unwrap());
        assert_eq!(plan.label(), "x");
        assert_eq!((plan.width(), plan.height()), (2, 2));
        assert_eq!(plan.ink(), &[(1, 0), (0, 1)]);
        assert_eq!(plan.ink_count(), 2);
    }
}
