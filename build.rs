use cfg_aliases::cfg_aliases;

fn main() {
    cfg_aliases! {
        wasm: { target_arch = "wasm32" },
        mobile: { any(target_os = "android", target_os = "ios") },
        graphics_backend: { any(feature = "sdl", feature = "winit", feature = "wgpu") },
        wgpu_backend: { all(feature = "wgpu", not(wasm)) },
        cross_backend: { not(graphics_mode) },
        graphics_mode: { any(graphics_backend, wasm) },
    }
}
