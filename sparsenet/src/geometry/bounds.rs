use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box over vertex positions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Returns `None` for an empty point set.
    pub fn of_points<I: IntoIterator<Item = (f64, f64)>>(points: I) -> Option<Bounds> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Bounds { min_x: x0, min_y: y0, max_x: x0, max_y: y0 };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}
