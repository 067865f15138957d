pub mod d001_resumen;
