use board_scene::{
    Animation, AssetCatalog, Cell, ChessBoard, Piece, PieceColor, PieceKind, Shape,
};

fn board(fen: &str) -> ChessBoard {
    ChessBoard::new(fen, AssetCatalog::silhouettes()).unwrap()
}

/// Apply every directive's end state, the way an engine would after playing.
fn finish_all(board: &mut ChessBoard, animations: &[Animation]) {
    for anim in animations {
        anim.finish(board.scene_mut());
    }
}

mod moves {
    use super::*;

    #[test]
    fn moving_from_empty_cell_is_a_no_op() {
        let mut b = board("8/8/8/8/8/8/P7/8");
        let before = b.scene().len();

        let anims = b.move_piece(Cell::new(3, 3), Cell::new(4, 4)).unwrap();

        assert!(anims.is_empty());
        assert_eq!(b.scene().len(), before);
        assert!(b.piece_at(Cell::new(6, 0)).unwrap().is_some());
        assert!(b.piece_at(Cell::new(4, 4)).unwrap().is_none());
    }

    #[test]
    fn quiet_move_relocates_piece() {
        let mut b = board("8/8/8/8/8/8/8/1N6");
        let knight = b.piece_at(Cell::new(7, 1)).unwrap().unwrap();

        let anims = b.move_piece(Cell::new(7, 1), Cell::new(5, 2)).unwrap();

        assert_eq!(anims.len(), 1);
        assert!(matches!(anims[0], Animation::MoveToTarget { id, .. } if id == knight));
        assert!(b.piece_at(Cell::new(7, 1)).unwrap().is_none());
        assert_eq!(b.piece_at(Cell::new(5, 2)).unwrap(), Some(knight));

        finish_all(&mut b, &anims);
        let center = b.scene().get(knight).unwrap().center;
        assert_eq!((center.x, center.y), (2.0, -5.0));
    }

    #[test]
    fn capture_fades_out_victim_before_move() {
        let mut b = board("8/8/8/3p4/4P3/8/8/8");
        let pawn = b.piece_at(Cell::new(4, 4)).unwrap().unwrap();
        let victim = b.piece_at(Cell::new(3, 3)).unwrap().unwrap();

        let anims = b.move_piece(Cell::new(4, 4), Cell::new(3, 3)).unwrap();

        assert_eq!(anims.len(), 2);
        assert_eq!(anims[0], Animation::FadeOut { id: victim });
        assert!(matches!(anims[1], Animation::MoveToTarget { id, .. } if id == pawn));
        assert!(b.piece_at(Cell::new(4, 4)).unwrap().is_none());
        assert_eq!(b.piece_at(Cell::new(3, 3)).unwrap(), Some(pawn));
        assert_eq!(b.piece_count(), 1);

        // The captured visual stays in the scene until its fade completes.
        assert!(b.scene().contains(victim));
        finish_all(&mut b, &anims);
        assert!(!b.scene().contains(victim));
        assert!(b.scene().contains(pawn));
    }
}

mod promotion {
    use super::*;

    #[test]
    fn white_pawn_on_row_zero_becomes_queen() {
        let mut b = board("8/8/8/8/8/8/P7/8");
        let pawn = b.piece_at(Cell::new(6, 0)).unwrap().unwrap();

        let anims = b.move_piece(Cell::new(6, 0), Cell::new(0, 0)).unwrap();

        assert_eq!(
            b.identify(Cell::new(0, 0)).unwrap(),
            Some(Piece::new(PieceKind::Queen, PieceColor::White))
        );
        let queen = b.piece_at(Cell::new(0, 0)).unwrap().unwrap();
        assert_ne!(queen, pawn);
        assert_eq!(anims.len(), 3);
        assert!(matches!(anims[0], Animation::MoveToTarget { id, .. } if id == pawn));
        assert_eq!(anims[1], Animation::FadeOut { id: pawn });
        assert_eq!(anims[2], Animation::FadeIn { id: queen });

        finish_all(&mut b, &anims);
        assert!(!b.scene().contains(pawn));
        let visual = b.scene().get(queen).unwrap();
        assert_eq!(visual.opacity, 1.0);
        let Shape::Piece(sprite) = &visual.shape else {
            panic!("expected a piece");
        };
        assert!((sprite.scale - 0.135).abs() < 1e-6);
    }

    #[test]
    fn black_pawn_on_last_row_becomes_queen() {
        let mut b = board("8/8/8/8/8/8/7p/8");
        b.move_piece(Cell::new(6, 7), Cell::new(7, 7)).unwrap();
        assert_eq!(
            b.identify(Cell::new(7, 7)).unwrap(),
            Some(Piece::new(PieceKind::Queen, PieceColor::Black))
        );
    }

    #[test]
    fn promotion_by_capture() {
        let mut b = board("1r6/P7/8/8/8/8/8/8");
        let anims = b.move_piece(Cell::new(1, 0), Cell::new(0, 1)).unwrap();
        // Capture fade, move, pawn fade, queen fade-in.
        assert_eq!(anims.len(), 4);
        assert_eq!(
            b.identify(Cell::new(0, 1)).unwrap(),
            Some(Piece::new(PieceKind::Queen, PieceColor::White))
        );
    }

    #[test]
    fn other_pieces_and_rows_are_unaffected() {
        let cases: [(&str, (usize, usize), (usize, usize), PieceKind, PieceColor); 4] = [
            ("8/8/8/8/8/8/R7/8", (6, 0), (0, 0), PieceKind::Rook, PieceColor::White),
            ("8/8/8/8/8/8/P7/8", (6, 0), (7, 0), PieceKind::Pawn, PieceColor::White),
            ("8/p7/8/8/8/8/8/8", (1, 0), (0, 0), PieceKind::Pawn, PieceColor::Black),
            ("8/8/8/8/8/8/k7/8", (6, 0), (7, 0), PieceKind::King, PieceColor::Black),
        ];
        for (fen, from, to, kind, color) in cases {
            let mut b = board(fen);
            let anims = b.move_piece(from.into(), to.into()).unwrap();
            assert_eq!(anims.len(), 1, "{fen}");
            assert_eq!(
                b.identify(to.into()).unwrap(),
                Some(Piece::new(kind, color)),
                "{fen}"
            );
        }
    }

    #[test]
    fn handle_promotion_directly_is_a_no_op_without_pawn() {
        let mut b = board("R7/8/8/8/8/8/8/8");
        let rook = b.piece_at(Cell::new(0, 0)).unwrap().unwrap();
        assert!(b.handle_pawn_promotion(rook, Cell::new(0, 0)).unwrap().is_empty());
        assert!(b.handle_pawn_promotion(rook, Cell::new(4, 4)).unwrap().is_empty());
    }
}

mod opacities {
    use super::*;

    fn piece_alphas(b: &ChessBoard) -> Vec<(usize, f32)> {
        b.scene()
            .iter()
            .filter_map(|(_, v)| match &v.shape {
                Shape::Piece(sprite) => Some((sprite.image.visible_pixels(), sprite.image.coverage())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn zero_then_one_restores_pieces() {
        let mut b = board("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
        let n = b.piece_count();

        b.set_piece_opacities(&vec![vec![0.0; 8]; 8]).unwrap();
        let hidden = piece_alphas(&b);
        assert_eq!(hidden.len(), n);
        assert!(hidden.iter().all(|(_, coverage)| *coverage == 0.0));

        b.set_piece_opacities(&vec![vec![1.0; 8]; 8]).unwrap();
        let shown = piece_alphas(&b);
        assert_eq!(shown.len(), n);
        assert!(shown.iter().all(|(_, coverage)| *coverage == 1.0));

        // Corners of the silhouettes were transparent and must stay that way.
        for (_, v) in b.scene().iter() {
            if let Shape::Piece(sprite) = &v.shape {
                assert_eq!(sprite.image.alpha_at(0, 0), Some(0));
            }
        }
    }

    #[test]
    fn per_cell_values() {
        let mut b = board("8/8/8/8/8/8/8/K6k");
        let mut matrix = vec![vec![1.0; 8]; 8];
        matrix[7][7] = 0.25;
        b.set_piece_opacities(&matrix).unwrap();

        let alpha_of = |cell: Cell| {
            let id = b.piece_at(cell).unwrap().unwrap();
            let Shape::Piece(sprite) = &b.scene().get(id).unwrap().shape else {
                panic!("expected a piece");
            };
            sprite.image.alpha_at(16, 16).unwrap()
        };
        assert_eq!(alpha_of(Cell::new(7, 0)), 255);
        assert_eq!(alpha_of(Cell::new(7, 7)), 64);
    }
}

mod layouts {
    use super::*;

    #[test]
    fn non_square_board() {
        let b = board("3/1K1/3/3/3");
        assert_eq!(b.dims(), (5, 3));
        assert_eq!(b.scene().len(), 15 + 1);
    }

    #[test]
    fn ragged_layout_is_padded() {
        let mut b = board("8/2/8");
        assert_eq!(b.dims(), (3, 8));
        assert!(b.piece_at(Cell::new(1, 7)).unwrap().is_none());
        assert!(b.move_piece(Cell::new(1, 7), Cell::new(0, 0)).unwrap().is_empty());
    }

    #[test]
    fn png_assets_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        for stem in ["wK", "bK"] {
            let mut img = image::RgbaImage::new(8, 8);
            img.put_pixel(4, 4, image::Rgba([0, 0, 0, 255]));
            img.save(dir.path().join(format!("{stem}.png"))).unwrap();
        }
        let b = ChessBoard::new("4k3/8/8/8/8/8/8/4K3", AssetCatalog::png(dir.path())).unwrap();
        assert_eq!(
            b.identify(Cell::new(7, 4)).unwrap(),
            Some(Piece::new(PieceKind::King, PieceColor::White))
        );
    }
}
