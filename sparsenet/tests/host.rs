use sparsenet::host::{
    gradient_handles, image_transform_params, read_geometry, set_gradient_handles,
    set_image_transform, write_geometry, GroupNode, HasFills, SceneNode, ShapeNode, VectorNode,
};
use sparsenet::model::{
    Affine2, ColorStop, GradientPaint, ImagePaint, PaintCommon, Rgba, ScaleMode,
};
use sparsenet::transform::{GradientParams, ImageTransformParams};
use sparsenet::{Paint, Region, SparseNetwork, SparseRegion, VectorNetwork};

fn triangle_node() -> SceneNode {
    let mut net = VectorNetwork::new();
    net.add_vertex(0.0, 0.0);
    net.add_vertex(10.0, 0.0);
    net.add_vertex(5.0, 8.0);
    net.add_segment(0, 1);
    net.add_segment(1, 2);
    net.add_segment(2, 0);
    net.regions.push(Region {
        loops: vec![vec![0, 1, 2]],
        fills: vec![Paint::solid(1.0, 0.0, 0.0)],
        ..Default::default()
    });
    SceneNode::Vector(VectorNode { name: "tri".into(), network: net, ..Default::default() })
}

fn gradient() -> Paint {
    Paint::GradientLinear(GradientPaint {
        gradient_stops: vec![
            ColorStop { position: 0.0, color: Rgba::rgb(0.0, 0.0, 0.0) },
            ColorStop { position: 1.0, color: Rgba::rgb(1.0, 1.0, 1.0) },
        ],
        gradient_transform: Affine2::default(),
        common: PaintCommon::default(),
    })
}

fn image() -> Paint {
    Paint::Image(ImagePaint {
        image_hash: Some("abc123".into()),
        scale_mode: ScaleMode::Fill,
        scaling_factor: None,
        rotation: None,
        image_transform: None,
        filters: None,
        common: PaintCommon::default(),
    })
}

#[test]
fn read_then_write_keeps_geometry() {
    let mut node = triangle_node();
    let sparse = read_geometry(&node).unwrap();
    assert_eq!(sparse.vertices, "[0,0,10,0,5,8]");
    assert_eq!(sparse.regions[0].loops, vec!["[0,1,2]".to_string()]);

    let before = node.clone();
    write_geometry(&mut node, &sparse).unwrap();
    let net = node.as_vector().unwrap().vector_network();
    assert_eq!(net.vertex_count(), 3);
    assert_eq!(net.segment_count(), 3);
    assert_eq!(net.regions[0].fills, vec![Paint::solid(1.0, 0.0, 0.0)]);
    assert_eq!(read_geometry(&node).unwrap(), read_geometry(&before).unwrap());
}

#[test]
fn failed_write_leaves_node_untouched() {
    let mut node = triangle_node();
    let before = node.clone();
    let bad = SparseNetwork {
        vertices: "[0,0,1,0,1,1,0,1]".into(),
        regions: vec![SparseRegion { loops: vec!["[0,1,2,5]".into()], ..Default::default() }],
        ..Default::default()
    };
    let err = write_geometry(&mut node, &bad).unwrap_err();
    assert_eq!(err.code(), "out_of_range");
    assert_eq!(node, before);
}

#[test]
fn nodes_without_networks_are_rejected() {
    let mut shape = SceneNode::Shape(ShapeNode {
        name: "rect".into(),
        width: 10.0,
        height: 4.0,
        ..Default::default()
    });
    let err = read_geometry(&shape).unwrap_err();
    assert_eq!(err.code(), "structural");
    assert!(err.to_string().contains("rect"));
    assert!(write_geometry(&mut shape, &SparseNetwork::placeholder_square()).is_err());

    let group = SceneNode::Group(GroupNode { name: "g".into(), children: vec![triangle_node()] });
    assert!(read_geometry(&group).is_err());
    assert!(group.fills().is_none());
    assert!(shape.fills().is_some());
}

#[test]
fn fills_capability_is_reachable_through_the_enum() {
    let mut node = triangle_node();
    node.fills_mut().unwrap().set_fills(vec![Paint::solid(0.0, 1.0, 0.0)]);
    assert_eq!(node.fills().unwrap().fills(), &[Paint::solid(0.0, 1.0, 0.0)]);
    let stroke = node.strokes_mut().unwrap();
    stroke.set_strokes(vec![Paint::solid(0.0, 0.0, 0.0)], 2.0);
    assert_eq!(stroke.stroke_weight(), 2.0);
}

#[test]
fn gradient_handles_round_trip_through_paint() {
    let mut paint = gradient();
    let identity = gradient_handles(&paint).unwrap();
    assert_eq!((identity.start_x, identity.start_y), (0.0, 0.0));
    assert_eq!((identity.end_x, identity.end_y), (1.0, 0.0));

    let params = GradientParams { start_x: 0.0, start_y: 0.5, end_x: 1.0, end_y: 0.5, scale: None };
    set_gradient_handles(&mut paint, params).unwrap();
    let back = gradient_handles(&paint).unwrap();
    assert_eq!((back.start_x, back.start_y, back.end_x, back.end_y), (0.0, 0.5, 1.0, 0.5));

    let mut solid = Paint::solid(1.0, 1.0, 1.0);
    assert!(gradient_handles(&solid).is_none());
    assert_eq!(set_gradient_handles(&mut solid, params).unwrap_err().code(), "structural");

    let nan = GradientParams { end_x: f64::NAN, ..params };
    assert_eq!(set_gradient_handles(&mut paint, nan).unwrap_err().code(), "malformed_input");
    assert_eq!(gradient_handles(&paint).unwrap().end_x, 1.0);
}

#[test]
fn image_transform_defaults_to_identity() {
    let mut paint = image();
    let p = image_transform_params(&paint).unwrap();
    assert_eq!(p, ImageTransformParams::default());

    let params = ImageTransformParams { rotation: 90.0, scale_x: 2.0, ..Default::default() };
    set_image_transform(&mut paint, params).unwrap();
    let q = image_transform_params(&paint).unwrap();
    assert_eq!(q.rotation, 90.0);
    assert_eq!(q.scale_x, 2.0);
    assert_eq!(q.scale_y, 1.0);

    assert!(image_transform_params(&gradient()).is_none());
    assert!(set_image_transform(&mut gradient(), params).is_err());
}
