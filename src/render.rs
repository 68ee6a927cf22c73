use crate::common::{Direction, Path, Query};
use crate::map::Map;

const BLOCKED: char = '🞨';
const OPEN: char = ' ';

fn arrow(direction: Direction) -> char {
    match direction {
        Direction::Up => '🡑',
        Direction::UpRight => '🡕',
        Direction::Right => '🡒',
        Direction::DownRight => '🡖',
        Direction::Down => '🡓',
        Direction::DownLeft => '🡗',
        Direction::Left => '🡐',
        Direction::UpLeft => '🡔',
        Direction::Unknown | Direction::Origin => OPEN,
    }
}

/// Draws the grid with the route on it, every cell between start and end
/// holding an arrow toward the next cell.
pub fn render_path(map: &Map, query: &Query, path: Option<&Path>) -> String {
    let Some(path) = path else {
        return "no path found".to_string();
    };

    let mut cells: Vec<char> = map
        .grid
        .iter()
        .map(|&passable| if passable { OPEN } else { BLOCKED })
        .collect();

    let steps = path.locations.windows(2).skip(1);
    for pair in steps {
        if let Some(direction) = pair[0].direction_to(pair[1]) {
            cells[pair[0].to_index(map.cols)] = arrow(direction);
        }
    }
    cells[query.start.to_index(map.cols)] = 'S';
    cells[query.end.to_index(map.cols)] = 'E';

    let mut out = format!("cost: {:.2}\n\n", path.cost);
    for row in cells.chunks(map.cols) {
        out.push('|');
        for &cell in row {
            out.push(cell);
            out.push('|');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::shortest_path;
    use crate::common::Location;

    #[test]
    fn test_render_path() {
        let (map, query) = Map::parse_text_grid("S10\n100\n11E").unwrap();
        let path = shortest_path(&map.grid, map.cols, map.rows, query.start, query.end);

        let rendered = render_path(&map, &query, path.as_ref());
        assert_eq!(rendered, "cost: 3.41\n\n|S| |🞨|\n|🡖|🞨|🞨|\n| |🡒|E|\n");
    }

    #[test]
    fn test_render_no_path() {
        let map = Map::new(2, 1);
        let query = Query::new(Location::new(0, 0), Location::new(1, 0));
        assert_eq!(render_path(&map, &query, None), "no path found");
    }
}
