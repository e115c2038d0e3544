use block_world::{
    config::{Settings, linear_rgba},
    data_structures::material::TextureKey,
    overlay::TexturePicker,
    render::{MeshKind, PipelineKind, TextureSlot, compose_overlay, compose_scene},
    world::World,
};
use cgmath::Point3;

fn translation(model: &[[f32; 4]; 4]) -> [f32; 3] {
    [model[3][0], model[3][1], model[3][2]]
}

#[test]
fn empty_world_draws_ground_then_ghost() {
    let settings = Settings::default();
    let world = World::new(&settings);
    let frame = compose_scene(&world, &settings, Point3::new(0.0, 5.0, 30.0));

    assert_eq!(frame.instances.len(), 2);
    assert_eq!(frame.batches.len(), 2);

    let ground = &frame.batches[0];
    assert_eq!(ground.mesh, MeshKind::Quad);
    assert_eq!(ground.texture, TextureSlot::Plain);
    assert_eq!(ground.pipeline, PipelineKind::Opaque);
    assert_eq!(frame.instances[0].tint, linear_rgba(settings.ground_colour, 1.0));
    assert_eq!(frame.instances[0].lit, 0.0);

    let ghost = &frame.batches[1];
    assert_eq!(ghost.mesh, MeshKind::Cube);
    assert_eq!(ghost.pipeline, PipelineKind::Transparent);
    assert_eq!(ghost.instances, 1..2);
    assert_eq!(frame.instances[1].tint[3], 0.5);
    assert_eq!(frame.instances[1].lit, 1.0);
    assert_eq!(translation(&frame.instances[1].model), [1.0, 1.0, 1.0]);
}

#[test]
fn ground_quad_lies_flat_and_spans_the_ground_size() {
    let settings = Settings::default();
    let world = World::new(&settings);
    let frame = compose_scene(&world, &settings, Point3::new(0.0, 5.0, 30.0));
    let model = frame.instances[0].model;

    // the quad's +Z normal (third column) is turned to +Y
    assert!((model[2][1] - 1.0).abs() < 1e-6);
    assert!(model[2][2].abs() < 1e-6);
    // its local X axis keeps the full ground width
    assert!((model[0][0] - 50.0).abs() < 1e-4);
}

#[test]
fn opaque_blocks_are_batched_per_texture() {
    let settings = Settings::default();
    let mut world = World::new(&settings);
    world.append(TextureKey::Stone, Point3::new(0.5, 0.5, 0.5));
    world.append(TextureKey::Grass, Point3::new(1.5, 0.5, 0.5));
    world.append(TextureKey::Grass, Point3::new(2.5, 0.5, 0.5));

    let frame = compose_scene(&world, &settings, Point3::new(0.0, 5.0, 30.0));
    let opaque: Vec<_> = frame
        .batches
        .iter()
        .filter(|batch| batch.pipeline == PipelineKind::Opaque && batch.mesh == MeshKind::Cube)
        .map(|batch| (batch.texture, batch.instances.len()))
        .collect();
    assert_eq!(
        opaque,
        vec![
            (TextureSlot::Key(TextureKey::Grass), 2),
            (TextureSlot::Key(TextureKey::Stone), 1),
        ]
    );
    assert!(frame.instances[1..4].iter().all(|raw| raw.lit == 1.0 && raw.tint[3] == 1.0));
}

#[test]
fn see_through_geometry_comes_last_sorted_back_to_front() {
    let settings = Settings::default();
    let mut world = World::new(&settings);
    world.set_preview(Point3::new(0.5, 0.5, 20.5));
    world.append(TextureKey::Water, Point3::new(0.5, 0.5, -10.5));
    world.append(TextureKey::Brick, Point3::new(0.5, 0.5, 0.5));
    world.append(TextureKey::Water, Point3::new(0.5, 0.5, 5.5));

    let frame = compose_scene(&world, &settings, Point3::new(0.0, 5.0, 30.0));
    let last_opaque = frame
        .batches
        .iter()
        .rposition(|batch| batch.pipeline == PipelineKind::Opaque)
        .expect("ground and brick");
    let first_transparent = frame
        .batches
        .iter()
        .position(|batch| batch.pipeline == PipelineKind::Transparent)
        .expect("water and ghost");
    assert!(last_opaque < first_transparent);

    let start = frame.batches[first_transparent].instances.start as usize;
    let order: Vec<[f32; 3]> = frame.instances[start..]
        .iter()
        .map(|raw| translation(&raw.model))
        .collect();
    assert_eq!(order.len(), 3);
    assert_eq!(order[0], [0.5, 0.5, -10.5]);
    assert_eq!(order[1], [0.5, 0.5, 5.5]);
    assert_eq!(order[2], [0.5, 0.5, 20.5]);

    let water: Vec<_> = frame.instances[start..start + 2]
        .iter()
        .map(|raw| raw.tint[3])
        .collect();
    assert_eq!(water, vec![0.7, 0.7]);
}

#[test]
fn overlay_is_drawn_panel_swatches_indicator() {
    let settings = Settings::default();
    let picker = TexturePicker::build(&TextureKey::ALL);
    let frame = compose_overlay(&picker, &settings);

    assert_eq!(frame.instances.len(), 10);
    assert!(frame.batches.iter().all(|batch| batch.pipeline == PipelineKind::Overlay));
    assert!(frame.batches.iter().all(|batch| batch.mesh == MeshKind::Quad));

    let textures: Vec<_> = frame.batches.iter().map(|batch| batch.texture).collect();
    let mut expected = vec![TextureSlot::Plain];
    expected.extend(TextureKey::ALL.iter().map(|key| TextureSlot::Key(*key)));
    expected.push(TextureSlot::Plain);
    assert_eq!(textures, expected);

    assert_eq!(frame.instances[0].tint, linear_rgba(settings.panel_colour, 1.0));
    assert_eq!(frame.instances[9].tint, linear_rgba(settings.indicator_colour, 1.0));
    assert_eq!(translation(&frame.instances[9].model), [-140.0, 17.0, 1.0]);
    assert_eq!(frame.instances[0].model[0][0], 330.0);
}

#[test]
fn indicator_follows_the_picker() {
    let settings = Settings::default();
    let mut picker = TexturePicker::build(&TextureKey::ALL);
    picker.set_indicator_position(20.0);
    let frame = compose_overlay(&picker, &settings);
    assert_eq!(translation(&frame.instances[9].model), [20.0, 17.0, 1.0]);
}
