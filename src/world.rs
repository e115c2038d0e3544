//! The in-memory block world.
//!
//! [`World`] keeps the ordered list of solid objects (the ground plane first,
//! placed blocks after it), the texture used for the next placement and the
//! position of the ghost block. It never renders; `render::compose_scene`
//! reads it every frame.

use cgmath::Point3;

use crate::{
    config::Settings,
    data_structures::material::{BlockMaterial, TextureKey},
    grid::CELL_SIZE,
    pick::{Hit, Ray, Shape, nearest_hit},
};

/// Identity of a [`PlacedObject`]. Never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ObjectKind {
    Ground,
    Block {
        texture: TextureKey,
        material: BlockMaterial,
    },
}

impl ObjectKind {
    /// A block using `texture` with the material that texture implies.
    pub fn block(texture: TextureKey) -> Self {
        ObjectKind::Block {
            texture,
            material: BlockMaterial::for_texture(texture),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub position: Point3<f32>,
}

impl PlacedObject {
    pub fn is_ground(&self) -> bool {
        matches!(self.kind, ObjectKind::Ground)
    }

    fn shape(&self, ground_size: f32) -> Shape {
        match self.kind {
            ObjectKind::Ground => Shape::Floor {
                centre: self.position,
                half_extent: ground_size / 2.0,
            },
            ObjectKind::Block { .. } => Shape::cube(self.position, CELL_SIZE),
        }
    }
}

pub struct World {
    objects: Vec<PlacedObject>,
    next_id: u32,
    ground_size: f32,
    chosen: TextureKey,
    preview: Point3<f32>,
}

impl World {
    /// A world holding only the ground plane.
    pub fn new(settings: &Settings) -> Self {
        let mut world = Self {
            objects: Vec::new(),
            next_id: 0,
            ground_size: settings.ground_size,
            chosen: settings.initial_texture,
            preview: settings.ghost_start.into(),
        };
        world.push(ObjectKind::Ground, Point3::new(0.0, 0.0, 0.0));
        world
    }

    /// Add a block at the end of the list.
    ///
    /// The cell is not checked for occupancy, two blocks may share a cell.
    pub fn append(&mut self, texture: TextureKey, position: Point3<f32>) -> ObjectId {
        self.push(ObjectKind::block(texture), position)
    }

    /// Remove the object with `id`. Returns whether something was removed;
    /// the ground is never removed.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        match self.objects.iter().position(|object| object.id == id) {
            Some(index) if !self.objects[index].is_ground() => {
                self.objects.remove(index);
                true
            }
            _ => false,
        }
    }

    /// All solid objects in insertion order, ground first.
    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    pub fn blocks(&self) -> impl Iterator<Item = &PlacedObject> {
        self.objects.iter().filter(|object| !object.is_ground())
    }

    pub fn get(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.objects.iter().find(|object| object.id == id)
    }

    pub fn ground(&self) -> &PlacedObject {
        // the ground is pushed in `new` and `remove` refuses to drop it
        &self.objects[0]
    }

    pub fn ground_size(&self) -> f32 {
        self.ground_size
    }

    pub fn chosen_texture(&self) -> TextureKey {
        self.chosen
    }

    pub fn set_chosen_texture(&mut self, key: TextureKey) {
        self.chosen = key;
    }

    /// Position of the ghost block.
    pub fn preview(&self) -> Point3<f32> {
        self.preview
    }

    pub fn set_preview(&mut self, position: Point3<f32>) {
        self.preview = position;
    }

    /// Nearest solid object along `ray`.
    pub fn pick(&self, ray: &Ray) -> Option<Hit<ObjectId>> {
        nearest_hit(
            ray,
            self.objects
                .iter()
                .map(|object| (object.id, object.shape(self.ground_size))),
        )
    }

    fn push(&mut self, kind: ObjectKind, position: Point3<f32>) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(PlacedObject { id, kind, position });
        id
    }
}
