//! Handing finished pieces to an output backend.
//!
//! The crate does not publish anything itself. A [`Minter`] receives each
//! [`FinishedPiece`] and decides where its image and trait metadata go.
use crate::error::Result;
use crate::piece::AttributeRecord;
use crate::raster::Canvas;

/// Composited image and chosen traits of one piece.
#[derive(Clone, Debug)]
pub struct FinishedPiece {
    pub id: u64,
    pub image: Canvas,
    pub attributes: Vec<AttributeRecord>,
}

/// Output backend for finished pieces.
pub trait Minter {
    fn mint_one(&mut self, piece: &FinishedPiece) -> Result<()>;

    /// Mints `pieces` in order and returns how many were minted. Stops at the first
    /// failure.
    fn mint_many(&mut self, pieces: &[FinishedPiece]) -> Result<usize> {
        for piece in pieces {
            self.mint_one(piece)?;
        }
        Ok(pieces.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::geometry::Rect;

    #[derive(Default)]
    struct Recording {
        ids: Vec<u64>,
        fail_on: Option<u64>,
    }

    impl Minter for Recording {
        fn mint_one(&mut self, piece: &FinishedPiece) -> Result<()> {
            if self.fail_on == Some(piece.id) {
                return Err(Error::Other(format!("rejected {}", piece.id)));
            }
            self.ids.push(piece.id);
            Ok(())
        }
    }

    fn finished(id: u64) -> FinishedPiece {
        FinishedPiece {
            id,
            image: Canvas::new(Rect::from_size(1, 1)),
            attributes: Vec::new(),
        }
    }

    #[test]
    fn mint_many_keeps_order() {
        let mut minter = Recording::default();
        let n = minter
            .mint_many(&[finished(3), finished(1), finished(2)])
            .expect("mint");
        assert_eq!(n, 3);
        assert_eq!(minter.ids, vec![3, 1, 2]);
    }

    #[test]
    fn mint_many_stops_at_first_failure() {
        let mut minter = Recording {
            fail_on: Some(1),
            ..Recording::default()
        };
        let err = minter
            .mint_many(&[finished(3), finished(1), finished(2)])
            .unwrap_err();
        assert!(matches!(err, Error::Other(_)));
        assert_eq!(minter.ids, vec![3]);
    }
}
