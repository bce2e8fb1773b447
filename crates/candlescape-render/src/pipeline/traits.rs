//! Traits for GPU rendering pipelines.

/// A GPU rendering pipeline.
pub trait Pipeline {
    /// Returns a reference to the underlying wgpu render pipeline.
    fn pipeline(&self) -> &wgpu::RenderPipeline;
}

/// Pipelines that draw one indexed mesh many times, with per-instance data in
/// vertex buffer slot 1.
///
/// The scene bind group (camera and light uniforms) sits at slot 0 and the
/// mesh vertices at vertex buffer slot 0.
pub trait InstancedMeshPipeline: Pipeline {
    /// Records an instanced, indexed draw.
    ///
    /// # Lifetimes
    ///
    /// The `'a` lifetime ensures that the buffers and bind group live at least
    /// as long as the render pass encoding.
    #[allow(clippy::too_many_arguments)]
    fn render_instances<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        scene_bind_group: &'a wgpu::BindGroup,
        vertex_buffer: &'a wgpu::Buffer,
        index_buffer: &'a wgpu::Buffer,
        index_count: u32,
        instance_buffer: &'a wgpu::Buffer,
        instance_count: u32,
    ) {
        render_pass.set_pipeline(self.pipeline());
        render_pass.set_bind_group(0, scene_bind_group, &[]);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, instance_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..index_count, 0, 0..instance_count);
    }
}
