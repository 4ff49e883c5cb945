//! Playfield tests - collision and merge through the public API

use lcd_tetris::core::{LevelTracker, Playfield, Shape, PIECES};
use lcd_tetris::types::{FULL_ROW, PLAYFIELD_ROWS, WALL_ROW};

/// Cell-by-cell collision check, independent of the row-word arithmetic.
fn reference_collides(field: &Playfield, shape: Shape, row: i8, col: i8) -> bool {
    for p in 0..2 {
        for b in 0..2 {
            if shape.row(p) & (1 << b) == 0 {
                continue;
            }
            let r = row as i32 + p as i32;
            let bit = col as i32 + 1 + b;
            if r < 0 || !(0..6).contains(&bit) {
                return true;
            }
            if field.row(r as usize) & (1 << bit) != 0 {
                return true;
            }
        }
    }
    false
}

fn fixtures() -> Vec<Playfield> {
    let mut fields = vec![Playfield::new()];

    let mut floor = [WALL_ROW; PLAYFIELD_ROWS];
    floor[15] = 0b111011;
    floor[14] = 0b100111;
    fields.push(Playfield::from_rows(floor));

    let mut checker = [WALL_ROW; PLAYFIELD_ROWS];
    for (r, row) in checker.iter_mut().enumerate() {
        *row |= if r % 2 == 0 { 0b001010 } else { 0b010100 };
    }
    fields.push(Playfield::from_rows(checker));

    let mut column = [WALL_ROW; PLAYFIELD_ROWS];
    for row in column.iter_mut().skip(4) {
        *row |= 0b010000;
    }
    fields.push(Playfield::from_rows(column));

    let mut top = [WALL_ROW; PLAYFIELD_ROWS];
    top[0] = 0b100011;
    top[1] = 0b110001;
    fields.push(Playfield::from_rows(top));

    fields
}

#[test]
fn test_collides_matches_cell_reference_exhaustively() {
    for (i, field) in fixtures().iter().enumerate() {
        for shape in PIECES {
            for row in -2i8..=18 {
                for col in -3i8..=7 {
                    assert_eq!(
                        field.collides(shape, row, col),
                        reference_collides(field, shape, row, col),
                        "fixture {} shape {:?} at ({}, {})",
                        i,
                        shape,
                        row,
                        col
                    );
                }
            }
        }
    }
}

#[test]
fn test_merge_single_cell_on_empty_field() {
    let mut field = Playfield::new();
    let mut levels = LevelTracker::new();

    let cleared = field.merge(Shape::new(0b01, 0b00), 14, 1);
    for _ in &cleared {
        levels.on_line_cleared();
    }

    assert!(cleared.is_empty());
    assert_eq!(field.row(14), WALL_ROW | 0b000100);
    assert_eq!(field.row(15), WALL_ROW);
    assert_eq!(levels, LevelTracker::new());
}

#[test]
fn test_merge_completing_bottom_row_collapses_once() {
    let mut rows = [WALL_ROW; PLAYFIELD_ROWS];
    rows[15] = 0b111101;
    rows[14] = 0b100111;
    rows[0] = 0b101001;
    let mut field = Playfield::from_rows(rows);

    let cleared = field.merge(PIECES[0], 15, 0);

    assert_eq!(cleared.as_slice(), &[15]);
    assert_eq!(field.row(15), 0b100111);
    assert_eq!(field.row(1), 0b101001);
    assert_eq!(field.row(0), WALL_ROW);
}

#[test]
fn test_merge_reports_rows_top_to_bottom() {
    let mut rows = [WALL_ROW; PLAYFIELD_ROWS];
    rows[10] = 0b111001;
    rows[11] = 0b111001;
    let mut field = Playfield::from_rows(rows);
    assert!(!field.collides(PIECES[3], 10, 0));

    let cleared = field.merge(PIECES[3], 10, 0);

    assert_eq!(cleared.as_slice(), &[10, 11]);
    assert!((0..PLAYFIELD_ROWS).all(|r| field.is_row_empty(r)));
}

#[test]
fn test_merge_never_leaves_full_rows() {
    let mut rows = [WALL_ROW; PLAYFIELD_ROWS];
    rows[14] = 0b111011;
    rows[15] = 0b110111;
    let mut field = Playfield::from_rows(rows);

    // vertical domino fills bit 2 of row 14 but bit 2 of row 15 is taken
    assert!(field.collides(PIECES[1], 14, 1));
    let cleared = field.merge(PIECES[0], 14, 1);

    assert_eq!(cleared.as_slice(), &[14]);
    assert!((0..PLAYFIELD_ROWS).all(|r| field.row(r) != FULL_ROW));
    assert!(field.walls_intact());
}
