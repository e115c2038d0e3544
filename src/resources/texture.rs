use crate::{
    data_structures::{material::TextureKey, texture::Texture},
    render::TextureSlot,
};

pub fn texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("texture_bind_group_layout"),
    })
}

fn mk_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &Texture,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            },
        ],
        label: Some(label),
    })
}

/// One bind group per [`TextureKey`] plus a plain white one for untextured
/// geometry. Key slots start out as 1x1 placeholders and are swapped when
/// their image arrives.
#[derive(Debug)]
pub struct TextureBank {
    layout: wgpu::BindGroupLayout,
    plain: wgpu::BindGroup,
    slots: Vec<wgpu::BindGroup>,
}

impl TextureBank {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let layout = texture_bind_group_layout(device);
        let white = Texture::solid(device, queue, [255, 255, 255, 255], "plain");
        let plain = mk_bind_group(device, &layout, &white, "plain_bind_group");
        let slots = TextureKey::ALL
            .iter()
            .map(|key| {
                let blank = Texture::solid(device, queue, [255, 255, 255, 255], key.name());
                mk_bind_group(device, &layout, &blank, key.name())
            })
            .collect();
        Self {
            layout,
            plain,
            slots,
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self, slot: TextureSlot) -> &wgpu::BindGroup {
        match slot {
            TextureSlot::Plain => &self.plain,
            TextureSlot::Key(key) => &self.slots[key.index()],
        }
    }

    /// Decode `bytes` and put the result into the slot of `key`. On error the
    /// slot keeps its current texture.
    pub fn replace(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        key: TextureKey,
        bytes: &[u8],
    ) -> anyhow::Result<()> {
        let texture = Texture::from_bytes(device, queue, bytes, &key.asset_path())?;
        self.slots[key.index()] = mk_bind_group(device, &self.layout, &texture, key.name());
        Ok(())
    }
}
