use domain::{Container, Measured};

/// Net produce weight: `bruto - truck_tara - sum(container tares)`.
///
/// All or nothing: if any container is missing from `registry` or has no
/// positive tare the result is `Measured::Unknown`, never a partial sum.
/// A result outside the `i64` range is unknown as well.
pub fn compute_neto(
    bruto: i64,
    truck_tara: i64,
    container_ids: &[String],
    registry: &[Container],
) -> Measured {
    let mut containers_tara: i64 = 0;
    for id in container_ids {
        let tare = registry
            .iter()
            .find(|c| &c.id == id)
            .and_then(Container::tare_kg);

        match tare.and_then(|kg| containers_tara.checked_add(kg)) {
            Some(sum) => containers_tara = sum,
            None => return Measured::Unknown,
        }
    }

    bruto
        .checked_sub(truck_tara)
        .and_then(|net| net.checked_sub(containers_tara))
        .into()
}
