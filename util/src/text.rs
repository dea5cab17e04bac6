use glam::{ivec2, IVec2};

pub trait StrExt {
    /// Get the smallest common indentation depth of nonempty lines of text.
    ///
    /// Both tabs and spaces are treated as a single unit of indentation.
    fn indentation(&self) -> usize;

    /// Return non-whitespace chars from a block of text mapped to their
    /// coordinates.
    ///
    /// The text is trimmed so that the result set will have a minimum x
    /// coordinate and a minimum y coordinate at 0.
    fn char_grid(&self) -> impl Iterator<Item = (IVec2, char)> + '_;

    /// Size of the bounding rectangle of `char_grid` points.
    fn char_grid_dim(&self) -> IVec2 {
        self.char_grid()
            .fold(IVec2::ZERO, |acc, (p, _)| acc.max(p + ivec2(1, 1)))
    }
}

impl StrExt for str {
    fn indentation(&self) -> usize {
        self.lines()
            .filter(|a| !a.trim().is_empty())
            .map(|a| a.chars().take_while(|c| c.is_whitespace()).count())
            .min()
            .unwrap_or(0)
    }

    fn char_grid(&self) -> impl Iterator<Item = (IVec2, char)> + '_ {
        let x_skip = self.indentation();

        self.lines()
            .skip_while(|a| a.trim().is_empty())
            .enumerate()
            .flat_map(move |(y, line)| {
                line.chars()
                    .skip(x_skip)
                    .enumerate()
                    .filter(|(_, c)| !c.is_whitespace())
                    .map(move |(x, c)| (ivec2(x as i32, y as i32), c))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grids() {
        fn g(text: &str) -> Vec<(IVec2, char)> {
            text.char_grid().collect()
        }

        assert_eq!(g(""), vec![]);
        assert_eq!(g("A"), vec![(ivec2(0, 0), 'A')]);
        assert_eq!(
            g("AB\nC"),
            vec![(ivec2(0, 0), 'A'), (ivec2(1, 0), 'B'), (ivec2(0, 1), 'C')]
        );

        assert_eq!(g("  A"), vec![(ivec2(0, 0), 'A')]);
        assert_eq!(g("\n\n  A"), vec![(ivec2(0, 0), 'A')]);
        assert_eq!(g("A  B"), vec![(ivec2(0, 0), 'A'), (ivec2(3, 0), 'B')]);
        assert_eq!(g("\nA"), vec![(ivec2(0, 0), 'A')]);
        assert_eq!(g("A\n\nB"), vec![(ivec2(0, 0), 'A'), (ivec2(0, 2), 'B')]);
    }

    #[test]
    fn grid_dims() {
        assert_eq!("".char_grid_dim(), ivec2(0, 0));
        assert_eq!(
            "
            ###
            #.#
            ##"
            .char_grid_dim(),
            ivec2(3, 3)
        );
    }
}
