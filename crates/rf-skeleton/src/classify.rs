use serde::{Deserialize, Serialize};

use rf_core::PixelCoord;

use crate::SkeletonMask;
use crate::neighbors::degree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelClass {
    EndPoint,
    Junction,
    Slab,
}

impl PixelClass {
    /// Degree 1 is an end point and degree above 2 a junction. Degree 0
    /// (isolated pixel) and degree 2 are slabs.
    pub fn from_degree(d: usize) -> Self {
        match d {
            1 => PixelClass::EndPoint,
            d if d > 2 => PixelClass::Junction,
            _ => PixelClass::Slab,
        }
    }
}

/// Disjoint partition of the skeleton pixels, each list in raster order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub end_points: Vec<PixelCoord>,
    pub junctions: Vec<PixelCoord>,
    pub slabs: Vec<PixelCoord>,
}

impl Classification {
    pub fn num_end_points(&self) -> usize {
        self.end_points.len()
    }

    pub fn num_junctions(&self) -> usize {
        self.junctions.len()
    }

    pub fn num_slabs(&self) -> usize {
        self.slabs.len()
    }

    pub fn total(&self) -> usize {
        self.end_points.len() + self.junctions.len() + self.slabs.len()
    }

    pub fn of_class(&self, class: PixelClass) -> &[PixelCoord] {
        match class {
            PixelClass::EndPoint => &self.end_points,
            PixelClass::Junction => &self.junctions,
            PixelClass::Slab => &self.slabs,
        }
    }

    /// Every classified pixel paired with its class, end points first.
    pub fn iter(&self) -> impl Iterator<Item = (PixelCoord, PixelClass)> + '_ {
        [PixelClass::EndPoint, PixelClass::Junction, PixelClass::Slab]
            .into_iter()
            .flat_map(move |class| self.of_class(class).iter().map(move |&p| (p, class)))
    }
}

pub fn classify(mask: &SkeletonMask) -> Classification {
    let mut out = Classification::default();
    for p in mask.iter_set() {
        match PixelClass::from_degree(degree(p, mask)) {
            PixelClass::EndPoint => out.end_points.push(p),
            PixelClass::Junction => out.junctions.push(p),
            PixelClass::Slab => out.slabs.push(p),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use rf_core::PixelCoord;

    use crate::{PixelClass, SkeletonMask, classify};

    fn mask(rows: &[&str]) -> SkeletonMask {
        let grid: Vec<Vec<bool>> = rows
            .iter()
            .map(|r| r.chars().map(|c| c == '#').collect())
            .collect();
        SkeletonMask::from_rows(&grid).expect("rectangular fixture")
    }

    #[test]
    fn degree_thresholds() {
        assert_eq!(PixelClass::from_degree(0), PixelClass::Slab);
        assert_eq!(PixelClass::from_degree(1), PixelClass::EndPoint);
        assert_eq!(PixelClass::from_degree(2), PixelClass::Slab);
        assert_eq!(PixelClass::from_degree(3), PixelClass::Junction);
        assert_eq!(PixelClass::from_degree(8), PixelClass::Junction);
    }

    #[test]
    fn straight_line() {
        let c = classify(&mask(&[".......", ".#####.", "......."]));

        assert_eq!(c.end_points, vec![PixelCoord::new(1, 1), PixelCoord::new(1, 5)]);
        assert_eq!(c.num_slabs(), 3);
        assert_eq!(c.num_junctions(), 0);
    }

    #[test]
    fn y_shape() {
        let c = classify(&mask(&[
            ".......",
            "...#...",
            "...#...",
            "...#...",
            "..#.#..",
            ".#...#.",
            ".......",
        ]));

        assert_eq!(
            c.end_points,
            vec![
                PixelCoord::new(1, 3),
                PixelCoord::new(5, 1),
                PixelCoord::new(5, 5),
            ]
        );
        assert_eq!(c.junctions, vec![PixelCoord::new(3, 3)]);
        assert_eq!(c.num_slabs(), 3);
        assert_eq!(c.total(), 7);
    }

    #[test]
    fn straight_tee_thickens_the_junction() {
        // Under 8-connectivity the pixels flanking a straight T crossing see the
        // stem diagonally, so they count as junctions too.
        let c = classify(&mask(&[".....", "#####", "..#..", "..#.."]));

        assert_eq!(
            c.junctions,
            vec![
                PixelCoord::new(1, 1),
                PixelCoord::new(1, 2),
                PixelCoord::new(1, 3),
                PixelCoord::new(2, 2),
            ]
        );
        assert_eq!(c.num_end_points(), 3);
    }

    #[test]
    fn isolated_pixel_is_slab() {
        let c = classify(&mask(&["...", ".#.", "..."]));

        assert!(c.end_points.is_empty());
        assert!(c.junctions.is_empty());
        assert_eq!(c.slabs, vec![PixelCoord::new(1, 1)]);
    }

    #[test]
    fn empty_mask_has_empty_sets() {
        let c = classify(&mask(&["....", "...."]));
        assert_eq!(c.total(), 0);

        let c = classify(&SkeletonMask::from_vec(0, 0, Vec::new()).expect("zero-sized"));
        assert_eq!(c.total(), 0);
    }

    #[test]
    fn iter_pairs_each_pixel_with_its_class() {
        let c = classify(&mask(&["###"]));
        let pairs: Vec<_> = c.iter().collect();

        assert_eq!(
            pairs,
            vec![
                (PixelCoord::new(0, 0), PixelClass::EndPoint),
                (PixelCoord::new(0, 2), PixelClass::EndPoint),
                (PixelCoord::new(0, 1), PixelClass::Slab),
            ]
        );
    }
}
