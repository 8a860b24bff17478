use std::collections::HashSet;

use rf_core::PixelCoord;
use tracing::{debug, trace};

use crate::neighbors::for_each_neighbor;
use crate::{SkeletonError, SkeletonMask};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RamificationConfig {
    /// Maximum stack pops per end point. `None` leaves traversal unbounded,
    /// which costs O(skeleton pixels) per end point in the worst case.
    pub max_steps: Option<usize>,
}

/// Counts end points from which some junction is reachable.
///
/// Each end point gets a fresh depth-first traversal that stops at the first
/// junction popped from its stack, so an end point contributes either 0 or 1
/// regardless of how many junctions lie behind it.
pub fn count_ramifications(
    mask: &SkeletonMask,
    end_points: &[PixelCoord],
    junctions: &[PixelCoord],
) -> usize {
    count_ramifications_with(mask, end_points, junctions, &RamificationConfig::default())
        .expect("unbounded traversal has no step budget to exceed")
}

/// [`count_ramifications`] with a per-end-point step budget.
///
/// Fails with [`SkeletonError::StepBudgetExceeded`] on the first end point
/// whose traversal runs out of steps before finding a junction or exhausting
/// its component.
pub fn count_ramifications_with(
    mask: &SkeletonMask,
    end_points: &[PixelCoord],
    junctions: &[PixelCoord],
    cfg: &RamificationConfig,
) -> Result<usize, SkeletonError> {
    let junction_set: HashSet<PixelCoord> = junctions.iter().copied().collect();
    let mut total = 0usize;
    for &ep in end_points {
        if reaches_junction(mask, ep, &junction_set, cfg.max_steps)? {
            total += 1;
        }
    }

    debug!(
        end_points = end_points.len(),
        junctions = junctions.len(),
        max_steps = ?cfg.max_steps,
        ramifications = total,
        "counted ramifications"
    );
    Ok(total)
}

fn reaches_junction(
    mask: &SkeletonMask,
    end_point: PixelCoord,
    junctions: &HashSet<PixelCoord>,
    max_steps: Option<usize>,
) -> Result<bool, SkeletonError> {
    if junctions.is_empty() {
        return Ok(false);
    }

    let mut visited = HashSet::new();
    let mut stack = vec![end_point];
    let mut steps = 0usize;
    while let Some(cur) = stack.pop() {
        if let Some(max) = max_steps
            && steps >= max
        {
            return Err(SkeletonError::StepBudgetExceeded {
                end_point,
                max_steps: max,
            });
        }
        steps += 1;

        if junctions.contains(&cur) {
            trace!(%end_point, junction = %cur, steps, "end point reaches junction");
            return Ok(true);
        }
        if !visited.insert(cur) {
            continue;
        }
        for_each_neighbor(cur, mask, |nb| stack.push(nb));
    }

    trace!(%end_point, steps, "end point has no reachable junction");
    Ok(false)
}

#[cfg(test)]
mod tests {
    use rf_core::PixelCoord;

    use crate::{
        RamificationConfig, SkeletonError, SkeletonMask, classify, count_ramifications,
        count_ramifications_with,
    };

    fn mask(rows: &[&str]) -> SkeletonMask {
        let grid: Vec<Vec<bool>> = rows
            .iter()
            .map(|r| r.chars().map(|c| c == '#').collect())
            .collect();
        SkeletonMask::from_rows(&grid).expect("rectangular fixture")
    }

    fn y_shape() -> SkeletonMask {
        mask(&[
            ".......",
            "...#...",
            "...#...",
            "...#...",
            "..#.#..",
            ".#...#.",
            ".......",
        ])
    }

    #[test]
    fn every_arm_of_a_y_reaches_the_junction() {
        let m = y_shape();
        let c = classify(&m);

        assert_eq!(count_ramifications(&m, &c.end_points, &c.junctions), 3);
    }

    #[test]
    fn line_without_junction_counts_zero() {
        let m = mask(&["#####"]);
        let c = classify(&m);

        assert_eq!(c.num_end_points(), 2);
        assert_eq!(count_ramifications(&m, &c.end_points, &c.junctions), 0);
    }

    #[test]
    fn detached_branch_does_not_count() {
        let m = mask(&[
            "........#",
            "...#....#",
            "...#....#",
            "...#.....",
            "..#.#....",
            ".#...#...",
            ".........",
        ]);
        let c = classify(&m);

        assert_eq!(c.num_end_points(), 5);
        assert_eq!(count_ramifications(&m, &c.end_points, &c.junctions), 3);
    }

    #[test]
    fn end_point_counts_once_past_several_junctions() {
        // Four arms around a cluster of junction pixels.
        let m = mask(&[
            "...........",
            ".#.......#.",
            "..#.....#..",
            "...#...#...",
            "....###....",
            "....#.#....",
            "...#...#...",
            "...........",
        ]);
        let c = classify(&m);
        let n = count_ramifications(&m, &c.end_points, &c.junctions);

        assert!(c.num_junctions() >= 2);
        assert_eq!(n, c.num_end_points());
    }

    #[test]
    fn explicit_sets_are_used_as_given() {
        let m = y_shape();
        let ends = [PixelCoord::new(1, 3)];

        assert_eq!(count_ramifications(&m, &ends, &[]), 0);
        assert_eq!(count_ramifications(&m, &[], &[PixelCoord::new(3, 3)]), 0);
        assert_eq!(count_ramifications(&m, &ends, &[PixelCoord::new(3, 3)]), 1);
    }

    #[test]
    fn step_budget() {
        let m = y_shape();
        let c = classify(&m);

        let roomy = RamificationConfig {
            max_steps: Some(m.count_set() * 8 + 1),
        };
        assert_eq!(
            count_ramifications_with(&m, &c.end_points, &c.junctions, &roomy).expect("budget"),
            3
        );
        assert_eq!(
            count_ramifications_with(
                &m,
                &c.end_points,
                &c.junctions,
                &RamificationConfig::default()
            )
            .expect("unbounded"),
            3
        );

        let tight = RamificationConfig { max_steps: Some(1) };
        let err = count_ramifications_with(&m, &c.end_points, &c.junctions, &tight)
            .expect_err("arms are two pixels long");
        assert_eq!(
            err,
            SkeletonError::StepBudgetExceeded {
                end_point: PixelCoord::new(1, 3),
                max_steps: 1,
            }
        );
    }
}
