//! Clip session: the operations a host UI drives
//!
//! A session owns the loaded pages, the working polygon editor and the
//! committed regions. Pointer events arrive in device pixels and are mapped
//! onto the page currently shown before they reach the editor.

use std::sync::Arc;

use crate::capture::{PageRasterizer, SourcePage, rasterize_all};
use crate::config::ClipConfig;
use crate::domain::{ClippedRegion, CursorHint, Point, Viewport};
use crate::editor::PointSetEditor;
use crate::error::{ClipError, ClipResult};
use crate::mapping;
use crate::render::{PageReconstructor, PngCodec, PolygonClipExtractor, RasterCodec};

use super::regions::RegionCollection;

pub struct ClipSession {
    pages: Vec<SourcePage>,
    current_page: usize,
    viewport: Option<Viewport>,
    editor: PointSetEditor,
    regions: RegionCollection,
    extractor: PolygonClipExtractor,
    reconstructor: PageReconstructor,
}

impl ClipSession {
    /// Session with the PNG codec
    pub fn new(config: &ClipConfig) -> Self {
        Self::with_codec(config, Arc::new(PngCodec))
    }

    pub fn with_codec(config: &ClipConfig, codec: Arc<dyn RasterCodec>) -> Self {
        Self {
            pages: Vec::new(),
            current_page: 0,
            viewport: None,
            editor: PointSetEditor::new(config.hit_radius),
            regions: RegionCollection::new(),
            extractor: PolygonClipExtractor::new(codec.clone()),
            reconstructor: PageReconstructor::new(codec)
                .with_background(config.background.into())
                .with_filter(config.resize_filter.into()),
        }
    }

    // ------------------------------------------------------------------
    // Pages and display
    // ------------------------------------------------------------------

    /// Replace the loaded pages and show the first one
    pub fn set_pages(&mut self, pages: Vec<SourcePage>) {
        log::info!("Loaded {} pages", pages.len());
        self.pages = pages;
        self.current_page = 0;
        self.editor.clear_all();
    }

    /// Rasterize a document through the upstream renderer
    pub fn load_pages(&mut self, rasterizer: &dyn PageRasterizer) -> ClipResult<usize> {
        let pages = rasterize_all(rasterizer)?;
        let count = pages.len();
        self.set_pages(pages);
        Ok(count)
    }

    pub fn pages(&self) -> &[SourcePage] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> ClipResult<&SourcePage> {
        self.pages.get(index).ok_or(ClipError::PageOutOfRange {
            index,
            count: self.pages.len(),
        })
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Switch the displayed page
    ///
    /// Working points belong to the page they were placed on, so they are
    /// dropped when the page changes.
    pub fn show_page(&mut self, index: usize) -> ClipResult<()> {
        self.page(index)?;
        if index != self.current_page {
            self.editor.clear_all();
            self.current_page = index;
        }
        Ok(())
    }

    /// Where the current page is drawn on the host surface
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    /// None until the host reports where the page is drawn
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    fn to_page(&self, device_x: f32, device_y: f32) -> Option<Point> {
        let page = self.pages.get(self.current_page)?;
        let viewport = self.viewport.filter(|v| v.width > 0.0 && v.height > 0.0)?;
        Some(mapping::map_to_page(
            device_x,
            device_y,
            &viewport,
            page.dimensions(),
        ))
    }

    pub fn on_pointer_down(&mut self, device_x: f32, device_y: f32) {
        match self.to_page(device_x, device_y) {
            Some(pos) => self.editor.on_pointer_down(pos),
            None => log::debug!("Pointer down ignored: no page or viewport"),
        }
    }

    pub fn on_pointer_move(&mut self, device_x: f32, device_y: f32) {
        if let Some(pos) = self.to_page(device_x, device_y) {
            self.editor.on_pointer_move(pos);
        }
    }

    pub fn on_pointer_up(&mut self) {
        self.editor.on_pointer_up();
    }

    pub fn on_pointer_leave(&mut self) {
        self.editor.on_pointer_leave();
    }

    pub fn clear_points(&mut self) {
        self.editor.clear_all();
    }

    pub fn editor(&self) -> &PointSetEditor {
        &self.editor
    }

    pub fn cursor(&self) -> CursorHint {
        self.editor.cursor()
    }

    /// Working points in device pixels, for drawing handles
    pub fn device_points(&self) -> Vec<(f32, f32)> {
        let (Some(page), Some(viewport)) = (self.pages.get(self.current_page), self.viewport) else {
            return Vec::new();
        };
        self.editor
            .points()
            .iter()
            .map(|p| mapping::to_device(*p, &viewport, page.dimensions()))
            .collect()
    }

    // ------------------------------------------------------------------
    // Regions
    // ------------------------------------------------------------------

    /// Extract the working polygon from `page_index` and store it
    ///
    /// The working list is cleared only on success; on failure neither the
    /// points nor the collection change.
    pub async fn commit_clip(&mut self, page_index: usize) -> ClipResult<ClippedRegion> {
        let polygon = self.editor.snapshot();
        if polygon.len() < crate::render::extract::MIN_POLYGON_POINTS {
            log::warn!("Commit rejected: {} points placed", polygon.len());
            return Err(ClipError::InsufficientPoints {
                count: polygon.len(),
            });
        }
        let source = self.page(page_index)?.bytes().clone();
        let insertion_index = self.regions.next_insertion_index();

        let region = self
            .extractor
            .extract(source, polygon, page_index, insertion_index)
            .await?;

        log::info!(
            "Committed region {} on page {page_index} ({}x{})",
            region.insertion_index(),
            region.extracted_size().0,
            region.extracted_size().1
        );
        self.regions.push(region.clone());
        self.editor.clear_all();
        Ok(region)
    }

    pub fn regions(&self) -> &RegionCollection {
        &self.regions
    }

    pub fn delete_region(&mut self, index: usize) -> Option<ClippedRegion> {
        let removed = self.regions.remove(index);
        if let Some(region) = &removed {
            log::info!("Deleted region {}", region.insertion_index());
        }
        removed
    }

    pub fn clear_all_regions(&mut self) {
        log::info!("Cleared {} regions", self.regions.len());
        self.regions.clear();
    }

    /// Composite of every region on `page_index`, None if it has none
    pub async fn reconstruct_page(&self, page_index: usize) -> ClipResult<Option<Vec<u8>>> {
        if self.regions.on_page(page_index).next().is_none() {
            return Ok(None);
        }
        let (width, height) = self.page(page_index)?.dimensions();
        self.reconstructor
            .reconstruct(page_index, width, height, self.regions.as_slice())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EditorState;
    use crate::render::codec::{decode_rgba, encode_png};
    use futures::FutureExt;
    use futures::future::BoxFuture;
    use image::{Rgba, RgbaImage};

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn black_square_page() -> RgbaImage {
        let mut page = RgbaImage::from_pixel(100, 100, WHITE);
        for y in 40..60 {
            for x in 40..60 {
                page.put_pixel(x, y, BLACK);
            }
        }
        page
    }

    /// Session showing the black-square page twice, unscaled
    fn session() -> ClipSession {
        let mut session = ClipSession::new(&ClipConfig::default());
        let page = SourcePage::from_rgba(&black_square_page()).unwrap();
        session.set_pages(vec![page.clone(), page]);
        session.set_viewport(Viewport {
            left: 0.0,
            top: 0.0,
            width: 100.0,
            height: 100.0,
        });
        session
    }

    fn click(session: &mut ClipSession, x: f32, y: f32) {
        session.on_pointer_down(x, y);
        session.on_pointer_up();
    }

    fn place_square(session: &mut ClipSession) {
        click(session, 40.0, 40.0);
        click(session, 60.0, 40.0);
        click(session, 60.0, 60.0);
        click(session, 40.0, 60.0);
    }

    #[tokio::test]
    async fn test_commit_and_reconstruct_black_square() {
        let mut session = session();
        // Placed apart, then the last two points are dragged onto the square
        click(&mut session, 40.0, 40.0);
        click(&mut session, 60.0, 40.0);
        click(&mut session, 90.0, 90.0);
        click(&mut session, 10.0, 90.0);
        session.on_pointer_down(88.0, 88.0);
        session.on_pointer_move(60.0, 60.0);
        session.on_pointer_up();
        session.on_pointer_down(12.0, 88.0);
        session.on_pointer_move(40.0, 60.0);
        session.on_pointer_up();
        assert_eq!(session.editor().points().len(), 4);

        let region = session.commit_clip(0).await.unwrap();
        assert_eq!(region.extracted_size(), (20, 20));
        assert!(session.editor().points().is_empty());
        assert_eq!(session.regions().len(), 1);

        let bytes = session.reconstruct_page(0).await.unwrap().unwrap();
        assert_eq!(decode_rgba(&bytes).unwrap(), black_square_page());
        assert!(session.reconstruct_page(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_commit_with_too_few_points_changes_nothing() {
        let mut session = session();
        for count in 0..3 {
            let err = session.commit_clip(0).await.unwrap_err();
            assert!(matches!(err, ClipError::InsufficientPoints { count: c } if c == count));
            assert_eq!(session.editor().points().len(), count);
            assert!(session.regions().is_empty());
            click(&mut session, count as f32 * 30.0, 5.0);
        }
    }

    /// Codec that cannot decode anything
    struct Offline;

    impl RasterCodec for Offline {
        fn decode(&self, _: Arc<[u8]>) -> BoxFuture<'static, ClipResult<RgbaImage>> {
            async { Err(ClipError::SourceUnavailable("offline".into())) }.boxed()
        }

        fn encode(&self, image: RgbaImage) -> BoxFuture<'static, ClipResult<Vec<u8>>> {
            async move { encode_png(&image) }.boxed()
        }
    }

    #[tokio::test]
    async fn test_failed_decode_keeps_points() {
        let mut session = ClipSession::with_codec(&ClipConfig::default(), Arc::new(Offline));
        session.set_pages(vec![SourcePage::from_rgba(&black_square_page()).unwrap()]);
        session.set_viewport(Viewport {
            left: 0.0,
            top: 0.0,
            width: 100.0,
            height: 100.0,
        });
        place_square(&mut session);

        let err = session.commit_clip(0).await.unwrap_err();
        assert!(matches!(err, ClipError::SourceUnavailable(_)));
        assert_eq!(session.editor().points().len(), 4);
        assert!(session.regions().is_empty());
    }

    #[tokio::test]
    async fn test_commit_unknown_page() {
        let mut session = session();
        place_square(&mut session);
        let err = session.commit_clip(7).await.unwrap_err();
        assert!(matches!(err, ClipError::PageOutOfRange { index: 7, count: 2 }));
        assert_eq!(session.editor().points().len(), 4);
    }

    #[tokio::test]
    async fn test_committed_region_is_a_snapshot() {
        let mut session = session();
        place_square(&mut session);
        let region = session.commit_clip(0).await.unwrap();

        // Points placed afterwards land in a fresh working list
        click(&mut session, 41.0, 41.0);
        session.on_pointer_down(41.0, 41.0);
        session.on_pointer_move(5.0, 5.0);
        session.on_pointer_up();

        assert_eq!(session.regions().get(0).unwrap(), &region);
        assert_eq!(region.polygon()[0], Point::new(40.0, 40.0));
    }

    #[tokio::test]
    async fn test_insertion_indices_survive_deletes() {
        let mut session = session();
        for _ in 0..3 {
            place_square(&mut session);
            session.commit_clip(0).await.unwrap();
        }
        let deleted = session.delete_region(0).unwrap();
        assert_eq!(deleted.insertion_index(), 0);
        assert!(session.delete_region(5).is_none());

        place_square(&mut session);
        let region = session.commit_clip(1).await.unwrap();
        assert_eq!(region.insertion_index(), 3);
        let indices: Vec<u64> = session.regions().iter().map(|r| r.insertion_index()).collect();
        assert_eq!(indices, vec![1, 2, 3]);

        session.clear_all_regions();
        assert!(session.regions().is_empty());
        assert!(session.reconstruct_page(0).await.unwrap().is_none());
    }

    #[test]
    fn test_pointer_events_are_scaled_to_source_pixels() {
        let mut session = session();
        // Page shown at half size, offset by (100, 50)
        session.set_viewport(Viewport {
            left: 100.0,
            top: 50.0,
            width: 50.0,
            height: 50.0,
        });
        click(&mut session, 110.0, 60.0);
        assert_eq!(session.editor().points(), &[Point::new(20.0, 20.0)]);

        // 9 device px = 18 source px: still within the 20 px radius
        session.on_pointer_down(119.0, 60.0);
        assert_eq!(session.editor().state(), EditorState::Dragging(0));
        session.on_pointer_up();

        // 11 device px = 22 source px: a new point
        click(&mut session, 121.0, 60.0);
        assert_eq!(session.editor().points().len(), 2);
        assert_eq!(session.device_points()[1], (121.0, 60.0));
    }

    #[test]
    fn test_show_page_drops_working_points() {
        let mut session = session();
        click(&mut session, 10.0, 10.0);
        session.show_page(0).unwrap();
        assert_eq!(session.editor().points().len(), 1);
        session.show_page(1).unwrap();
        assert!(session.editor().points().is_empty());
        assert!(matches!(
            session.show_page(2),
            Err(ClipError::PageOutOfRange { index: 2, .. })
        ));
        assert_eq!(session.current_page(), 1);
    }

    #[test]
    fn test_pointer_ignored_without_viewport() {
        let mut session = ClipSession::new(&ClipConfig::default());
        session.set_pages(vec![SourcePage::from_rgba(&black_square_page()).unwrap()]);
        assert!(session.viewport().is_none());
        click(&mut session, 10.0, 10.0);
        assert!(session.editor().points().is_empty());
        assert!(session.device_points().is_empty());

        session.set_viewport(Viewport {
            left: 0.0,
            top: 0.0,
            width: 100.0,
            height: 100.0,
        });
        click(&mut session, 10.0, 10.0);
        assert_eq!(session.editor().points(), &[Point::new(10.0, 10.0)]);
    }

    #[test]
    fn test_pointer_ignored_without_pages() {
        let mut session = ClipSession::new(&ClipConfig::default());
        click(&mut session, 10.0, 10.0);
        assert!(session.editor().points().is_empty());
    }
}
