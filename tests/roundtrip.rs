use geocodec::{
    ByteOrder, Coordinate, CoordinateSequence, Geometry, GeometryFactory, LinearRing, Ordinates,
    Polygon, PrecisionModel, WkbReader, WkbWriter, WkbWriterConfig, WktReader, WktWriter,
    WktWriterConfig,
};
use rstest::rstest;

fn coord(i: usize) -> Coordinate {
    let i = i as f64;
    Coordinate::xyzm(i * 1.5, -i / 3.0, 100.0 + i, 0.25 * i)
}

fn seq(ordinates: Ordinates, indices: impl IntoIterator<Item = usize>) -> CoordinateSequence {
    CoordinateSequence::from_coords(ordinates, indices.into_iter().map(coord))
}

fn ring(factory: &GeometryFactory, ordinates: Ordinates, start: usize) -> LinearRing {
    factory.create_linear_ring(seq(ordinates, [start, start + 1, start + 2, start])).unwrap()
}

fn polygon(factory: &GeometryFactory, ordinates: Ordinates, start: usize) -> Polygon {
    factory.create_polygon(Some(ring(factory, ordinates, start)), vec![ring(factory, ordinates, start + 10)]).unwrap()
}

/// One of every shape the binary format can carry, all coordinates holding every ordinate in `ordinates`.
fn shapes(factory: &GeometryFactory, ordinates: Ordinates) -> Vec<Geometry> {
    let point = |i: usize| factory.create_point(seq(ordinates, [i])).unwrap();
    let line = |i: usize| factory.create_line_string(seq(ordinates, i..i + 3)).unwrap();
    vec![
        point(1).into(),
        line(0).into(),
        polygon(factory, ordinates, 0).into(),
        factory.create_multi_point(vec![point(2), point(3)]).into(),
        factory.create_multi_line_string(vec![line(4), line(8)]).into(),
        factory.create_multi_polygon(vec![polygon(factory, ordinates, 20), polygon(factory, ordinates, 40)]).into(),
        factory.create_geometry_collection(vec![
            point(5).into(),
            line(6).into(),
            polygon(factory, ordinates, 60).into(),
            factory.create_geometry_collection(vec![point(7).into()]).into(),
        ]).into(),
    ]
}

/// Empty forms of every shape, declared XY.
fn empties(factory: &GeometryFactory) -> Vec<Geometry> {
    vec![
        factory.create_empty_point(Ordinates::XY).into(),
        factory.create_line_string(CoordinateSequence::new(Ordinates::XY)).unwrap().into(),
        factory.create_polygon(None, Vec::new()).unwrap().into(),
        factory.create_multi_point(Vec::new()).into(),
        factory.create_multi_line_string(Vec::new()).into(),
        factory.create_multi_polygon(Vec::new()).into(),
        factory.create_geometry_collection(Vec::new()).into(),
        factory.create_geometry_collection(vec![factory.create_empty_point(Ordinates::XY).into()]).into(),
    ]
}

#[rstest]
fn wkb_roundtrip(
    #[values(Ordinates::XY, Ordinates::XYZ, Ordinates::XYM, Ordinates::XYZM)] ordinates: Ordinates,
    #[values(ByteOrder::LittleEndian, ByteOrder::BigEndian)] byte_order: ByteOrder,
    #[values(false, true)] iso: bool,
) {
    // ISO codes have no room for an SRID.
    let factory = GeometryFactory::new(PrecisionModel::Floating, if iso { 0 } else { 4326 });
    let config = WkbWriterConfig::builder()
        .byte_order(byte_order)
        .ordinates(ordinates)
        .strict(iso)
        .handle_srid(!iso)
        .build()
        .unwrap();
    let writer = WkbWriter::with_config(config);
    let reader = WkbReader::default();

    for geometry in shapes(&factory, ordinates).into_iter().chain(empties(&factory)) {
        if !geometry.is_empty() || ordinates == Ordinates::XY {
            let bytes = writer.write(&geometry).unwrap();
            assert_eq!(bytes.len(), writer.encoded_len(&geometry));
            assert_eq!(reader.read(&bytes).unwrap(), geometry, "{}", writer.write_hex(&geometry).unwrap());
        }
    }
}

#[rstest]
fn wkt_roundtrip(
    #[values(Ordinates::XY, Ordinates::XYZ, Ordinates::XYM, Ordinates::XYZM)] ordinates: Ordinates,
    #[values(false, true)] pretty: bool,
) {
    let factory = GeometryFactory::new(PrecisionModel::Floating, 3857);
    let writer = WktWriter::with_config(
        WktWriterConfig::builder().emit_srid(true).pretty(pretty).coordinates_per_line(2).build(),
    );
    let reader = WktReader::default();

    let mut geometries = shapes(&factory, ordinates);
    geometries.push(ring(&factory, ordinates, 90).into());
    if ordinates == Ordinates::XY {
        geometries.extend(empties(&factory));
    }
    for geometry in geometries {
        let text = writer.write(&geometry);
        assert_eq!(reader.read(&text).unwrap(), geometry, "{text}");
    }
}

#[rstest]
#[case("POINT (1 2)")]
#[case("LINESTRING EMPTY")]
#[case("POLYGON Z ((0 0 0, 1 0 1, 1 1 1, 0 0 0))")]
#[case("MULTIPOINT M ((1 2 3), (4 5 6))")]
#[case("GEOMETRYCOLLECTION ZM (POINT ZM (1 2 3 4), LINESTRING ZM (0 0 0 0, 1 1 1 1))")]
fn wkt_through_wkb_and_back(#[case] text: &str) {
    let geometry = WktReader::default().read(text).unwrap();
    let config = WkbWriterConfig::builder().ordinates(geometry.ordinates()).build().unwrap();
    let hex = WkbWriter::with_config(config).write_hex(&geometry).unwrap();
    let decoded = WkbReader::default().read_hex(&hex).unwrap();
    assert_eq!(decoded, geometry);
    assert_eq!(WktWriter::new().write(&decoded), text);
}
