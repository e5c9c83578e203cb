use std::{env, error::Error, fs::File, io::BufReader};

use ndarray::Array2;
use serde::Deserialize;

use note_decoder::{convert, ConvertParams};

/// Posteriorgram bundle as produced by the inference side: row-major matrices
/// plus the conversion parameters, all in one JSON document.
#[derive(Deserialize)]
struct DecodeRequest {
    notes: Vec<Vec<f32>>,
    onsets: Vec<Vec<f32>>,
    contours: Vec<Vec<f32>>,
    #[serde(default)]
    params: ConvertParams,
}

fn to_matrix(rows: Vec<Vec<f32>>) -> Result<Array2<f32>, Box<dyn Error>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, |row| row.len());
    if rows.iter().any(|row| row.len() != n_cols) {
        return Err("posteriorgram rows have differing lengths".into());
    }

    let flat: Vec<f32> = rows.into_iter().flatten().collect();
    Ok(Array2::from_shape_vec((n_rows, n_cols), flat)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .ok_or("usage: note-decoder <request.json>")?;
    let request: DecodeRequest = serde_json::from_reader(BufReader::new(File::open(path)?))?;

    let notes = to_matrix(request.notes)?;
    let onsets = to_matrix(request.onsets)?;
    let contours = to_matrix(request.contours)?;

    let events = convert(
        notes.view(),
        onsets.view(),
        contours.view(),
        &request.params,
    )?;

    serde_json::to_writer_pretty(std::io::stdout().lock(), &events)?;
    println!();

    Ok(())
}
